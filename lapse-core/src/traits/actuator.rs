//! Shutter output trait

/// Drives the camera release
///
/// `set_relay` closes the shutter contact. `set_wake` is the short pulse
/// that rouses a sleeping camera ahead of a shot; boards without a separate
/// wake line drive it on the relay as well.
pub trait ShutterActuator {
    /// Assert or release the shutter relay
    fn set_relay(&mut self, asserted: bool);

    /// Assert or release the wake pulse
    fn set_wake(&mut self, asserted: bool);
}
