pub mod platform_traits;
