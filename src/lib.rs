pub mod arith;
pub mod checkpoint;
pub mod constraints;
pub mod error;
pub mod generator;
pub mod rare;
pub mod search;

pub use arith::{big_isqrt, is_perfect_square};
pub use checkpoint::SearchCheckpoint;
pub use constraints::{rare_last_digits, rare_second_digit_pairs, LEADING_DIGITS};
pub use error::RareError;
pub use generator::{search_length_parallel, RareNumbers};
pub use rare::{digital_root, is_rare, reverse_number};
pub use search::{resume_search, search_lengths, SearchConfig, SearchEvent};
