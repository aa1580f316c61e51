//! Capability traits consumed by the recorder, replay, and interest model.

mod granule_mapper;
mod graph_store;

pub use granule_mapper::IGranuleMapper;
pub use graph_store::IGraphStore;
