pub mod market_snapshot;
pub mod sidebar;
pub mod theme_toggle;
