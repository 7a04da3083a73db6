/// Trace and branch file loading.
pub mod loader;
