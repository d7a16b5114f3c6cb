pub mod zone_cache;

pub use zone_cache::ZoneCache;
