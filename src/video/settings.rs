use color_filters::{FilterError, FilterSettings};
use tokio::sync::watch;

/// Owner of the settings the video worker reads.
///
/// Updates replace the whole record at once. The worker copies one
/// snapshot per frame, so a frame is never filtered with a mix of old and
/// new fields.
pub struct SettingsHandle {
    tx: watch::Sender<FilterSettings>,
}

impl SettingsHandle {
    pub fn new(initial: FilterSettings) -> Result<Self, FilterError> {
        initial.validate()?;
        let (tx, _rx) = watch::channel(initial);
        Ok(Self { tx })
    }

    /// Validate and publish a new record. Invalid settings leave the
    /// current record in place.
    pub fn update(&self, settings: FilterSettings) -> Result<(), FilterError> {
        settings.validate()?;
        self.tx.send_replace(settings);
        tracing::debug!(?settings, "Video settings updated");
        Ok(())
    }

    /// Apply a change to a copy of the current record, then publish it.
    pub fn modify(&self, f: impl FnOnce(FilterSettings) -> FilterSettings) -> Result<(), FilterError> {
        self.update(f(self.current()))
    }

    pub fn current(&self) -> FilterSettings {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterSettings> {
        self.tx.subscribe()
    }
}
