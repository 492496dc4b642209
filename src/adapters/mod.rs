// Adapters layer: concrete implementations for external systems (routing service, storage).

pub mod osrm;
pub mod storage;
