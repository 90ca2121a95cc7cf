use futures::channel::oneshot;

/// Completion side handed to an asset loader
pub type AssetSender<T> = oneshot::Sender<anyhow::Result<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Body,
    Plinth,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Body => write!(f, "body"),
            AssetKind::Plinth => write!(f, "plinth"),
        }
    }
}

enum Slot<T> {
    Pending(oneshot::Receiver<anyhow::Result<T>>),
    Loaded(T),
    Failed,
}

impl<T> Slot<T> {
    fn poll(&mut self, kind: AssetKind) {
        let Slot::Pending(receiver) = self else {
            return;
        };

        match receiver.try_recv() {
            Ok(None) => {}
            Ok(Some(Ok(value))) => {
                log::info!("{} asset loaded", kind);
                *self = Slot::Loaded(value);
            }
            Ok(Some(Err(e))) => {
                log::error!("{} load error: {:#}", kind, e);
                *self = Slot::Failed;
            }
            Err(oneshot::Canceled) => {
                log::error!("{} loader went away without reporting", kind);
                *self = Slot::Failed;
            }
        }
    }

    fn is_settled(&self) -> bool {
        !matches!(self, Slot::Pending(_))
    }

    fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Slot::Failed) {
            Slot::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Both asset results once each load has either succeeded or failed
#[derive(Debug)]
pub struct Settled<T> {
    pub body: Option<T>,
    pub plinth: Option<T>,
}

/// Join point for the two concurrent asset loads.
///
/// `poll` never blocks. It yields `Settled` exactly once, after both loads
/// have finished, so assembly never sees partial data.
pub struct AssetBarrier<T> {
    body: Slot<T>,
    plinth: Slot<T>,
    released: bool,
}

impl<T> AssetBarrier<T> {
    pub fn new() -> (Self, AssetSender<T>, AssetSender<T>) {
        let (body_tx, body_rx) = oneshot::channel();
        let (plinth_tx, plinth_rx) = oneshot::channel();

        let barrier = Self {
            body: Slot::Pending(body_rx),
            plinth: Slot::Pending(plinth_rx),
            released: false,
        };

        (barrier, body_tx, plinth_tx)
    }

    pub fn poll(&mut self) -> Option<Settled<T>> {
        if self.released {
            return None;
        }

        self.body.poll(AssetKind::Body);
        self.plinth.poll(AssetKind::Plinth);

        if !(self.body.is_settled() && self.plinth.is_settled()) {
            return None;
        }

        self.released = true;
        Some(Settled {
            body: self.body.take(),
            plinth: self.plinth.take(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_both() {
        let (mut barrier, body, plinth) = AssetBarrier::<u32>::new();
        assert!(barrier.poll().is_none());

        body.send(Ok(1)).unwrap();
        assert!(barrier.poll().is_none());
        assert!(barrier.poll().is_none());

        plinth.send(Ok(2)).unwrap();
        let settled = barrier.poll().unwrap();
        assert_eq!(settled.body, Some(1));
        assert_eq!(settled.plinth, Some(2));
    }

    #[test]
    fn releases_only_once() {
        let (mut barrier, body, plinth) = AssetBarrier::<u32>::new();
        body.send(Ok(1)).unwrap();
        plinth.send(Ok(2)).unwrap();
        assert!(barrier.poll().is_some());
        assert!(barrier.poll().is_none());
    }

    #[test]
    fn failure_settles_without_value() {
        let (mut barrier, body, plinth) = AssetBarrier::<u32>::new();
        body.send(Err(anyhow::anyhow!("missing file"))).unwrap();
        plinth.send(Ok(7)).unwrap();

        let settled = barrier.poll().unwrap();
        assert!(settled.body.is_none());
        assert_eq!(settled.plinth, Some(7));
    }

    #[test]
    fn dropped_sender_counts_as_failure() {
        let (mut barrier, body, plinth) = AssetBarrier::<u32>::new();
        drop(body);
        assert!(barrier.poll().is_none());
        plinth.send(Ok(3)).unwrap();

        let settled = barrier.poll().unwrap();
        assert!(settled.body.is_none());
        assert_eq!(settled.plinth, Some(3));
    }
}
