use bitflags::bitflags;

bitflags! {
    /// Classification of the duty the player is currently in.
    ///
    /// Configuration options store a set of these to restrict a behaviour to
    /// selected content (e.g. "only use Living Dead in savage and ultimate").
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ContentFlags: u16 {
        const OPEN_WORLD = 1 << 0;
        const DUNGEON = 1 << 1;
        const NORMAL_RAID = 1 << 2;
        const ALLIANCE_RAID = 1 << 3;
        const TRIAL = 1 << 4;
        const EXTREME = 1 << 5;
        const SAVAGE = 1 << 6;
        const ULTIMATE = 1 << 7;
        const UNREAL = 1 << 8;
        const CRITERION = 1 << 9;
        const VARIANT = 1 << 10;

        const HIGH_END = Self::EXTREME.bits()
            | Self::SAVAGE.bits()
            | Self::ULTIMATE.bits()
            | Self::UNREAL.bits()
            | Self::CRITERION.bits();
    }
}

impl ContentFlags {
    /// Returns true when the current duty is one of the configured ones.
    ///
    /// An empty configured set means "no restriction".
    pub fn admits(self, current: ContentFlags) -> bool {
        self.is_empty() || self.intersects(current)
    }
}
