use num_bigint::BigUint;
use std::time::Instant;

use crate::checkpoint::SearchCheckpoint;
use crate::error::RareError;
use crate::generator::{search_length_parallel, RareNumbers};

/// Settings for a multi-length search.
///
/// `end` is inclusive; `None` searches upward without bound, in which case
/// the run only stops by external interruption. Checkpoints apply to
/// sequential runs only.
pub struct SearchConfig {
    pub start: u32,
    pub end: Option<u32>,
    pub parallel: bool,
    pub checkpoint_interval: Option<u32>,
    pub checkpoint_file: Option<String>,
}

/// Progress notifications delivered to the search callback.
pub enum SearchEvent<'a> {
    /// A digit length is about to be swept.
    LengthStarted(u32),
    /// A rare number was confirmed.
    Found(&'a BigUint),
    /// A checkpoint was written after completing this length.
    CheckpointSaved(u32),
}

/// Walk digit lengths from `config.start`, emitting every rare number of
/// each length through the callback in generation order.
///
/// Returns the collected numbers once the end bound is exhausted. Unbounded
/// runs never return normally; consumers stream results through the
/// callback instead.
pub fn search_lengths<F>(config: SearchConfig, on_event: F) -> Result<Vec<BigUint>, RareError>
where
    F: FnMut(SearchEvent),
{
    if config.start < 1 {
        return Err(RareError::InvalidStartLength(config.start));
    }

    run_lengths(&config, config.start, Vec::new(), 0, 0.0, on_event)
}

/// Continue a sequential search from a saved checkpoint. The partially
/// finished length (if any) is swept again from its start.
pub fn resume_search<F>(
    checkpoint: SearchCheckpoint,
    parallel: bool,
    on_event: F,
) -> Result<Vec<BigUint>, RareError>
where
    F: FnMut(SearchEvent),
{
    if checkpoint.next_length < 1 {
        return Err(RareError::InvalidStartLength(checkpoint.next_length));
    }

    let config = SearchConfig {
        start: checkpoint.start_length,
        end: checkpoint.end_length,
        parallel,
        checkpoint_interval: checkpoint.checkpoint_interval,
        checkpoint_file: checkpoint.checkpoint_file.clone(),
    };

    run_lengths(
        &config,
        checkpoint.next_length,
        checkpoint.found,
        checkpoint.lengths_completed,
        checkpoint.elapsed_secs,
        on_event,
    )
}

fn run_lengths<F>(
    config: &SearchConfig,
    first_length: u32,
    mut found: Vec<BigUint>,
    mut lengths_completed: u32,
    prior_elapsed: f64,
    mut on_event: F,
) -> Result<Vec<BigUint>, RareError>
where
    F: FnMut(SearchEvent),
{
    let start_time = Instant::now();
    let mut length = first_length;

    loop {
        if let Some(end) = config.end {
            if length > end {
                break;
            }
        }

        on_event(SearchEvent::LengthStarted(length));

        if config.parallel {
            for n in search_length_parallel(length) {
                on_event(SearchEvent::Found(&n));
                found.push(n);
            }
        } else {
            for n in RareNumbers::new(length) {
                on_event(SearchEvent::Found(&n));
                found.push(n);
            }
        }

        lengths_completed += 1;

        let should_checkpoint = !config.parallel
            && config
                .checkpoint_interval
                .is_some_and(|interval| interval > 0 && lengths_completed % interval == 0);

        if should_checkpoint {
            if let Some(ref file) = config.checkpoint_file {
                let checkpoint = SearchCheckpoint::new(
                    config.start,
                    config.end,
                    length + 1,
                    found.clone(),
                    lengths_completed,
                    config.checkpoint_interval,
                    config.checkpoint_file.clone(),
                    prior_elapsed + start_time.elapsed().as_secs_f64(),
                );

                if let Err(e) = checkpoint.save(file) {
                    eprintln!("Warning: Failed to save checkpoint: {}", e);
                } else {
                    on_event(SearchEvent::CheckpointSaved(length));
                }
            }
        }

        length += 1;
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: u32, end: Option<u32>) -> SearchConfig {
        SearchConfig {
            start,
            end,
            parallel: false,
            checkpoint_interval: None,
            checkpoint_file: None,
        }
    }

    #[test]
    fn test_start_below_one_is_rejected() {
        let result = search_lengths(config(0, Some(2)), |_| {});
        assert_eq!(result, Err(RareError::InvalidStartLength(0)));
    }

    #[test]
    fn test_single_length_matches_generator() {
        let driver = search_lengths(config(2, Some(2)), |_| {}).unwrap();
        let generator: Vec<BigUint> = RareNumbers::new(2).collect();
        assert_eq!(driver, generator);
    }

    #[test]
    fn test_bounded_range_collects_all_lengths() {
        let found = search_lengths(config(1, Some(6)), |_| {}).unwrap();
        assert_eq!(
            found,
            vec![BigUint::from(65u32), BigUint::from(621770u32)]
        );
    }

    #[test]
    fn test_events_are_emitted_in_order() {
        let mut lengths = Vec::new();
        let mut found = Vec::new();
        search_lengths(config(2, Some(4)), |event| match event {
            SearchEvent::LengthStarted(l) => lengths.push(l),
            SearchEvent::Found(n) => found.push(n.clone()),
            SearchEvent::CheckpointSaved(_) => {}
        })
        .unwrap();
        assert_eq!(lengths, vec![2, 3, 4]);
        assert_eq!(found, vec![BigUint::from(65u32)]);
    }

    #[test]
    fn test_checkpoint_written_and_resumable() {
        let path = std::env::temp_dir().join("rare_finder_search_resume_test.json");
        let path_str = path.to_str().unwrap().to_string();

        let cfg = SearchConfig {
            start: 2,
            end: Some(4),
            parallel: false,
            checkpoint_interval: Some(1),
            checkpoint_file: Some(path_str.clone()),
        };
        let mut saves = 0;
        let direct = search_lengths(cfg, |event| {
            if let SearchEvent::CheckpointSaved(_) = event {
                saves += 1;
            }
        })
        .unwrap();
        assert_eq!(saves, 3);

        // The final checkpoint points past the end bound; resuming is a
        // no-op that returns the same results.
        let checkpoint = SearchCheckpoint::load(&path_str).unwrap();
        assert_eq!(checkpoint.next_length, 5);
        let resumed = resume_search(checkpoint, false, |_| {}).unwrap();
        assert_eq!(resumed, direct);

        std::fs::remove_file(&path).ok();
    }
}
