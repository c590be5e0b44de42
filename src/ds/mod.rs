pub mod frequency_index;

pub use frequency_index::{FrequencyIndex, FrequencySlot};
