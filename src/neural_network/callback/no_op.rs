use super::*;

/// Callback installed by default; ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl Callback for NoOpCallback {}
