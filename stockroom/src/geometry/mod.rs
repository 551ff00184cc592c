pub mod geo_enums;
pub mod geo_traits;
