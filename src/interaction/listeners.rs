use super::RowIdentity;

type Listener = Box<dyn Fn(&RowIdentity) + Send + Sync>;

/// Callbacks run, in registration order, when a row is activated.
#[derive(Default)]
pub struct ActivationListeners {
    listeners: Vec<Listener>,
}

impl ActivationListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, listener: F)
    where
        F: Fn(&RowIdentity) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&self, row: &RowIdentity) {
        for listener in &self.listeners {
            listener(row);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ActivationListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
