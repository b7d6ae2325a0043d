//! Layout planning for newsletter entries
//!
//! Assigns every entry a [`Placement`]: featured entries go first as single
//! placements, then the remaining entries alternate between one single
//! placement and a batch of up to `batch_size` batched placements.

use std::collections::VecDeque;

use tracing::debug;

use crate::entry::{Entry, Placement};
use crate::error::{NewsletterError, Result};

/// Batch size used when none is configured (two rows of a 2x2 grid)
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// Entry counts per placement class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Entries promoted by the featured tag
    pub featured: usize,
    /// All single placements, featured included
    pub single: usize,
    /// Batched placements
    pub batched: usize,
}

/// Ordered entries with their final placements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    entries: Vec<Entry>,
    batch_size: usize,
}

impl LayoutPlan {
    /// Planned entries in output order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Consume the plan, returning its entries
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Batch size the plan was built with
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of planned entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there is nothing to lay out
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries per placement class
    pub fn stats(&self) -> LayoutStats {
        let mut stats = LayoutStats::default();
        for entry in &self.entries {
            match entry.placement {
                Some(Placement::Single) => {
                    stats.single += 1;
                    if entry.is_featured() {
                        stats.featured += 1;
                    }
                }
                Some(Placement::Batched) => stats.batched += 1,
                None => {}
            }
        }
        stats
    }
}

fn place(mut entry: Entry, placement: Placement) -> Entry {
    entry.placement = Some(placement);
    entry
}

/// Plan the layout of an ordered list of entries
///
/// 1. Entries tagged `featured` are placed single, ahead of everything else,
///    in their original order.
/// 2. While more than `batch_size` regular entries remain, one is placed
///    single and the next `batch_size` batched.
/// 3. The remaining tail (at most `batch_size` entries) gets one single
///    placement if it holds at least two entries; the rest are batched.
///
/// A lone regular entry is therefore batched, not single.
///
/// # Errors
///
/// Returns [`NewsletterError::InvalidBatchSize`] if `batch_size` is zero.
///
/// # Examples
///
/// ```
/// use newsletter_rs::{Entry, Placement, plan_layout};
///
/// let entries: Vec<Entry> = (1..=10)
///     .map(|i| Entry::new(format!("Post {}", i), "", "", ""))
///     .collect();
/// let plan = plan_layout(entries, 4).unwrap();
///
/// let singles: Vec<usize> = plan
///     .entries()
///     .iter()
///     .enumerate()
///     .filter(|(_, e)| e.placement == Some(Placement::Single))
///     .map(|(i, _)| i)
///     .collect();
/// assert_eq!(singles, vec![0, 5]);
/// ```
pub fn plan_layout(entries: Vec<Entry>, batch_size: usize) -> Result<LayoutPlan> {
    if batch_size == 0 {
        return Err(NewsletterError::InvalidBatchSize(batch_size));
    }

    let total = entries.len();
    let (featured, regular): (Vec<Entry>, Vec<Entry>) =
        entries.into_iter().partition(Entry::is_featured);

    let mut planned = Vec::with_capacity(total);
    planned.extend(featured.into_iter().map(|e| place(e, Placement::Single)));

    let mut queue: VecDeque<Entry> = regular.into();
    while !queue.is_empty() {
        if queue.len() > batch_size {
            if let Some(entry) = queue.pop_front() {
                planned.push(place(entry, Placement::Single));
            }
            let take = batch_size.min(queue.len());
            planned.extend(queue.drain(..take).map(|e| place(e, Placement::Batched)));
        } else {
            if queue.len() >= 2 {
                if let Some(entry) = queue.pop_front() {
                    planned.push(place(entry, Placement::Single));
                }
            }
            planned.extend(queue.drain(..).map(|e| place(e, Placement::Batched)));
        }
    }

    let plan = LayoutPlan {
        entries: planned,
        batch_size,
    };
    let stats = plan.stats();
    debug!(
        "Planned {} entries (batch size {}): {} featured, {} single, {} batched",
        plan.len(),
        batch_size,
        stats.featured,
        stats.single,
        stats.batched
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(n: usize) -> Vec<Entry> {
        (1..=n)
            .map(|i| Entry::new(format!("Post {}", i), "", "", ""))
            .collect()
    }

    fn placements(plan: &LayoutPlan) -> Vec<Placement> {
        plan.entries().iter().filter_map(|e| e.placement).collect()
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = plan_layout(posts(3), 0).unwrap_err();
        assert!(matches!(err, NewsletterError::InvalidBatchSize(0)));
    }

    #[test]
    fn test_empty_input() {
        let plan = plan_layout(Vec::new(), 4).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.stats(), LayoutStats::default());
    }

    #[test]
    fn test_single_regular_entry_is_batched() {
        let plan = plan_layout(posts(1), 4).unwrap();
        assert_eq!(placements(&plan), vec![Placement::Batched]);
    }

    #[test]
    fn test_two_regular_entries() {
        let plan = plan_layout(posts(2), 4).unwrap();
        assert_eq!(placements(&plan), vec![Placement::Single, Placement::Batched]);
    }

    #[test]
    fn test_ten_entries_batch_four() {
        use Placement::{Batched as B, Single as S};
        let plan = plan_layout(posts(10), 4).unwrap();
        assert_eq!(placements(&plan), vec![S, B, B, B, B, S, B, B, B, B]);
        assert_eq!(
            plan.stats(),
            LayoutStats {
                featured: 0,
                single: 2,
                batched: 8
            }
        );
    }

    #[test]
    fn test_tail_branch_after_wide_batches() {
        use Placement::{Batched as B, Single as S};
        // 7 > 4: S + 4B, then 2 remain: S + B
        let plan = plan_layout(posts(7), 4).unwrap();
        assert_eq!(placements(&plan), vec![S, B, B, B, B, S, B]);
        // 6 > 4: S + 4B, then a lone entry is batched
        let plan = plan_layout(posts(6), 4).unwrap();
        assert_eq!(placements(&plan), vec![S, B, B, B, B, B]);
    }

    #[test]
    fn test_batch_size_one() {
        use Placement::{Batched as B, Single as S};
        let plan = plan_layout(posts(5), 1).unwrap();
        assert_eq!(placements(&plan), vec![S, B, S, B, B]);
    }

    #[test]
    fn test_featured_entries_lead() {
        let mut entries = posts(4);
        entries[2] = entries[2].clone().with_tags(["featured"]);
        let plan = plan_layout(entries, 4).unwrap();

        assert_eq!(plan.entries()[0].title, "Post 3");
        assert_eq!(plan.entries()[0].placement, Some(Placement::Single));
        let rest: Vec<&str> = plan.entries()[1..]
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(rest, vec!["Post 1", "Post 2", "Post 4"]);
        assert_eq!(plan.stats().featured, 1);
        assert_eq!(plan.batch_size(), 4);
    }

    #[test]
    fn test_only_featured_entries() {
        let entries: Vec<Entry> = posts(3)
            .into_iter()
            .map(|e| e.with_tags(["featured"]))
            .collect();
        let plan = plan_layout(entries, 2).unwrap();
        assert_eq!(placements(&plan), vec![Placement::Single; 3]);
    }
}
