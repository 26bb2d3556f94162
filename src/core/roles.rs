//! Callback roles a state handler can opt into.

bitflags::bitflags! {
    /// The set of callbacks a handler supports.
    ///
    /// A handler reports its roles once, when it is registered. The machine
    /// dispatches only the callbacks named here and never asks again.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Roles: u8 {
        /// `on_enter` when the state becomes current.
        const ENTER = 1 << 0;
        /// `on_exit` when the state stops being current.
        const EXIT = 1 << 1;
        /// `on_update` on every update tick.
        const UPDATE = 1 << 2;
        /// `on_fixed_update` on every fixed update tick.
        const FIXED_UPDATE = 1 << 3;
        /// `on_late_update` on every late update tick.
        const LATE_UPDATE = 1 << 4;
        /// `on_suspend` and `on_resume`, always together.
        const SUSPEND = 1 << 5;

        /// Enter and exit.
        const LIFECYCLE = Self::ENTER.bits() | Self::EXIT.bits();
        /// All three tick callbacks.
        const TICKS = Self::UPDATE.bits() | Self::FIXED_UPDATE.bits() | Self::LATE_UPDATE.bits();
    }
}
