/// Explicit release of a GPU-resident object
pub trait Dispose {
    fn dispose(self);
}

impl Dispose for wgpu::Buffer {
    fn dispose(self) {
        self.destroy();
    }
}

impl Dispose for wgpu::Texture {
    fn dispose(self) {
        self.destroy();
    }
}

macro_rules! dispose_by_drop {
    ($($ty:ty),* $(,)?) => {
        $(impl Dispose for $ty {
            fn dispose(self) {
                drop(self);
            }
        })*
    };
}

dispose_by_drop!(
    wgpu::RenderPipeline,
    wgpu::BindGroup,
    wgpu::BindGroupLayout,
    wgpu::TextureView,
    wgpu::Sampler,
    wgpu::Surface<'static>,
);

/// Owner of a single disposable resource. Disposing is idempotent: the
/// resource is handed to its disposer at most once.
#[derive(Debug)]
pub struct ResourceSlot<T: Dispose> {
    label: &'static str,
    inner: Option<T>,
}

impl<T: Dispose> ResourceSlot<T> {
    pub fn new(label: &'static str, value: T) -> Self {
        Self { label, inner: Some(value) }
    }

    pub fn empty(label: &'static str) -> Self {
        Self { label, inner: None }
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Install a new resource, disposing any previous one
    pub fn replace(&mut self, value: T) {
        self.dispose();
        self.inner = Some(value);
    }

    /// Returns true if a resource was released by this call
    pub fn dispose(&mut self) -> bool {
        match self.inner.take() {
            Some(value) => {
                log::trace!("disposing {}", self.label);
                value.dispose();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted(Rc<Cell<u32>>);

    impl Dispose for Counted {
        fn dispose(self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn disposes_exactly_once() {
        let count = Rc::new(Cell::new(0));
        let mut slot = ResourceSlot::new("buffer", Counted(count.clone()));

        assert!(slot.dispose());
        assert!(!slot.dispose());
        assert!(slot.get().is_none());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn replace_disposes_previous() {
        let count = Rc::new(Cell::new(0));
        let mut slot = ResourceSlot::new("buffer", Counted(count.clone()));
        slot.replace(Counted(count.clone()));
        assert_eq!(count.get(), 1);
        slot.dispose();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn empty_slot_disposes_nothing() {
        let mut slot: ResourceSlot<Counted> = ResourceSlot::empty("unused");
        assert!(!slot.dispose());
        assert!(slot.get().is_none());
    }
}
