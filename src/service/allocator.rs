use crate::error::AllocationError;
use crate::models::{
    Allocation, BillInventory, Combo, RecipientBreakdown, RecipientRequest,
};
use crate::service::combinations;
use indexmap::IndexSet;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default cap on combos tried per allocation.
pub const DEFAULT_MAX_STEPS: u64 = 2_000_000;
/// Default cap on candidate combos generated per allocation, across all recipients.
pub const DEFAULT_MAX_CANDIDATES: u64 = 2_000_000;
/// Default cap on recipients per allocation.
pub const DEFAULT_MAX_RECIPIENTS: usize = 500;

/// Upper bound on search work. `None` fields are unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub max_steps: Option<u64>,
    pub max_candidates: Option<u64>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self {
            max_steps: None,
            max_candidates: None,
        }
    }

    /// Step limit with the default candidate limit.
    pub fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            max_candidates: Some(DEFAULT_MAX_CANDIDATES),
        }
    }

    pub fn with_max_candidates(self, max_candidates: Option<u64>) -> Self {
        Self {
            max_candidates,
            ..self
        }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::steps(DEFAULT_MAX_STEPS)
    }
}

struct StepCounter {
    taken: u64,
    budget: SearchBudget,
}

impl StepCounter {
    fn new(budget: SearchBudget) -> Self {
        Self { taken: 0, budget }
    }

    fn tick(&mut self) -> Result<(), AllocationError> {
        self.taken += 1;
        match self.budget.max_steps {
            Some(max_steps) if self.taken > max_steps => {
                Err(AllocationError::SearchBudgetExhausted { max_steps })
            }
            _ => Ok(()),
        }
    }
}

/// Assigns one bill combo per recipient out of a shared inventory.
///
/// Stateless apart from its limits; every call works on its own copy of the
/// inventory, so one allocator can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Allocator {
    budget: SearchBudget,
    max_recipients: Option<usize>,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(SearchBudget::default())
    }
}

impl Allocator {
    pub fn new(budget: SearchBudget) -> Self {
        Self {
            budget,
            max_recipients: Some(DEFAULT_MAX_RECIPIENTS),
        }
    }

    pub fn with_max_recipients(mut self, max_recipients: Option<usize>) -> Self {
        self.max_recipients = max_recipients;
        self
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    pub fn max_recipients(&self) -> Option<usize> {
        self.max_recipients
    }

    /// All-or-nothing allocation. Breakdowns come back in the caller's order.
    pub fn allocate(
        &self,
        requests: &[RecipientRequest],
        inventory: &BillInventory,
    ) -> Result<Allocation, AllocationError> {
        // Phase 1: reject malformed input before any search
        if let Some(max) = self.max_recipients {
            if requests.len() > max {
                return Err(AllocationError::TooManyRecipients {
                    count: requests.len(),
                    max,
                });
            }
        }

        let mut seen: IndexSet<&str> = IndexSet::with_capacity(requests.len());
        for request in requests {
            if !seen.insert(request.id.as_str()) {
                return Err(AllocationError::DuplicateRecipient(request.id.clone()));
            }
        }

        let needing_cash = requests.iter().filter(|r| r.amount > 0).count();
        if needing_cash > 0 && inventory.is_empty() {
            tracing::warn!("Inventory is empty, {} recipient(s) need cash", needing_cash);
            return Err(AllocationError::EmptyInventory(needing_cash));
        }

        let requested: u64 = requests.iter().map(|r| u64::from(r.amount)).sum();
        let available = inventory.total_value();
        tracing::info!(
            "Allocating {} recipient(s), requested {}, on hand {}",
            requests.len(), requested, available
        );

        // Phase 2: candidates per recipient against the full inventory
        let candidates = self.generate_candidates(requests, inventory)?;

        if let Some((request, _)) = requests
            .iter()
            .zip(&candidates)
            .find(|(_, combos)| combos.is_empty())
        {
            tracing::warn!(
                "Recipient {}: amount {} cannot be built from inventory",
                request.id, request.amount
            );
            return Err(AllocationError::UnrepresentableAmount {
                recipient: request.id.clone(),
                amount: request.amount,
            });
        }

        if requested > available {
            return Err(AllocationError::InfeasibleAllocation {
                requested,
                available,
            });
        }

        // Phase 3: largest amounts first, ties in caller order
        let mut order: Vec<usize> = (0..requests.len()).collect();
        order.sort_by_key(|&idx| Reverse(requests[idx].amount));
        let ordered: Vec<&[Combo]> = order.iter().map(|&idx| candidates[idx].as_slice()).collect();

        for &idx in &order {
            tracing::debug!(
                "Recipient {}: amount {}, {} candidate combo(s)",
                requests[idx].id, requests[idx].amount, candidates[idx].len()
            );
        }

        // Phase 4: depth-first search
        let mut steps = StepCounter::new(self.budget);
        let outcome = descend(&ordered, *inventory, &mut steps);
        let Some((chosen, remaining)) = outcome? else {
            tracing::info!("No joint allocation after {} step(s)", steps.taken);
            return Err(AllocationError::InfeasibleAllocation {
                requested,
                available,
            });
        };

        // Phase 5: back to caller order
        let mut by_request = vec![Combo::default(); requests.len()];
        for (&idx, combo) in order.iter().zip(chosen) {
            by_request[idx] = combo;
        }

        let breakdowns = requests
            .iter()
            .zip(&by_request)
            .map(|(request, combo)| RecipientBreakdown {
                id: request.id.clone(),
                amount: request.amount,
                bills: combo.to_bills(),
            })
            .collect();

        tracing::info!(
            "Allocation found after {} step(s), {} left in inventory",
            steps.taken,
            remaining.total_value()
        );

        Ok(Allocation {
            breakdowns,
            remaining,
            steps: steps.taken,
        })
    }

    /// Builds every recipient's candidate list in parallel, charging all of
    /// them to one shared candidate limit.
    fn generate_candidates(
        &self,
        requests: &[RecipientRequest],
        inventory: &BillInventory,
    ) -> Result<Vec<Vec<Combo>>, AllocationError> {
        let Some(max_candidates) = self.budget.max_candidates else {
            return Ok(requests
                .par_iter()
                .map(|r| combinations::generate(r.amount, inventory))
                .collect());
        };

        let produced = AtomicU64::new(0);
        let candidates = requests
            .par_iter()
            .map(|r| {
                combinations::generate_within(r.amount, inventory, &produced, max_candidates)
                    .ok_or(AllocationError::CandidateLimitExceeded { max_candidates })
            })
            .collect::<Result<Vec<_>, _>>();

        if candidates.is_err() {
            tracing::warn!(
                "Candidate generation stopped at {} combo(s)",
                produced.load(Ordering::Relaxed)
            );
        }
        candidates
    }
}

/// Position in the search: the next candidate to try at this level and the
/// inventory left before choosing it.
struct Frame {
    next: usize,
    remaining: BillInventory,
}

/// Depth-first search over one candidate list per level, kept on an explicit
/// stack so depth is bounded by memory, not the thread stack. Each frame holds
/// its own inventory, so backing out of a level is a pop with no undo. On
/// success returns the chosen combos in search order and the final inventory.
fn descend(
    candidates: &[&[Combo]],
    inventory: BillInventory,
    steps: &mut StepCounter,
) -> Result<Option<(Vec<Combo>, BillInventory)>, AllocationError> {
    let depth = candidates.len();
    let mut chosen: Vec<Combo> = Vec::with_capacity(depth);
    let mut frames = vec![Frame {
        next: 0,
        remaining: inventory,
    }];

    loop {
        let level = chosen.len();
        let Some(frame) = frames.last_mut() else {
            return Ok(None);
        };
        if level == depth {
            return Ok(Some((chosen, frame.remaining)));
        }

        let options = candidates[level];
        let mut admitted = None;
        while let Some(combo) = options.get(frame.next) {
            frame.next += 1;
            steps.tick()?;
            if combo.fits_within(&frame.remaining) {
                admitted = Some(*combo);
                break;
            }
        }

        match admitted {
            Some(combo) => {
                let next = frame.remaining.checked_sub(&combo)?;
                chosen.push(combo);
                frames.push(Frame {
                    next: 0,
                    remaining: next,
                });
            }
            None => {
                // level exhausted
                frames.pop();
                chosen.pop();
            }
        }
    }
}
