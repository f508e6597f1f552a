pub mod allocation;
pub mod pack_size;
