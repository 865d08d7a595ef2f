pub mod interpolate;
pub mod periods;
pub mod windows;

pub use interpolate::interpolate;
pub use periods::business_periods;
