//! Contact selection: one actionable contact per business.
//!
//! Downstream outreach tooling works business-by-business, so each surviving
//! record keeps exactly one contact — the one most likely to have purchasing
//! authority and a way to reach them. Scoring is a data table, not branching
//! logic, so the weights can be tuned and tested independently.

use leadscout_core::{BusinessRecord, ContactRecord};

/// Points awarded per title keyword found in a contact's position. A title
/// can match several keywords ("Founder & CEO" collects both).
const POSITION_SCORES: &[(&str, u32)] = &[
    ("ceo", 100),
    ("president", 95),
    ("owner", 90),
    ("founder", 85),
    ("chief", 80),
    ("vp", 75),
    ("director", 70),
    ("principal", 65),
    ("partner", 60),
    ("head", 55),
    ("lead", 50),
    ("manager", 45),
    ("supervisor", 35),
    ("administrator", 25),
    ("specialist", 15),
    ("assistant", 10),
    ("coordinator", 5),
];

/// Bonus for a reachable contact: having an email matters more than having
/// a phone number for outreach.
const EMAIL_BONUS: u32 = 15;
const PHONE_BONUS: u32 = 10;

/// Scores one contact: title keywords plus reachability bonuses.
#[must_use]
pub fn score_contact(contact: &ContactRecord) -> u32 {
    let title = contact
        .position
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let mut score: u32 = POSITION_SCORES
        .iter()
        .filter(|(keyword, _)| title.contains(keyword))
        .map(|(_, points)| points)
        .sum();

    if contact.email.as_deref().is_some_and(|e| !e.trim().is_empty()) {
        score += EMAIL_BONUS;
    }
    if contact
        .phone_number
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty())
    {
        score += PHONE_BONUS;
    }
    score
}

/// Narrows a business to its single best contact.
///
/// Contacts flagged as decision makers are preferred as a group; within that
/// group (or the full list when none are flagged) the highest score wins,
/// earliest-listed on ties. The survivor gets `is_primary = true`; everyone
/// else is discarded.
#[must_use]
pub fn optimize_contacts(mut business: BusinessRecord) -> BusinessRecord {
    match business.contacts.len() {
        0 => business,
        1 => {
            business.contacts[0].is_primary = true;
            business
        }
        _ => {
            let has_decision_makers = business.contacts.iter().any(|c| c.is_decision_maker);
            let candidates: Vec<ContactRecord> = if has_decision_makers {
                business
                    .contacts
                    .drain(..)
                    .filter(|c| c.is_decision_maker)
                    .collect()
            } else {
                business.contacts.drain(..).collect()
            };

            let mut best: Option<(u32, ContactRecord)> = None;
            for contact in candidates {
                let score = score_contact(&contact);
                let replace = best.as_ref().is_none_or(|(top, _)| score > *top);
                if replace {
                    best = Some((score, contact));
                }
            }

            if let Some((score, mut winner)) = best {
                tracing::debug!(
                    business = %business.name,
                    contact = %winner.name,
                    score,
                    "selected primary contact"
                );
                winner.is_primary = true;
                business.contacts.push(winner);
            }
            business
        }
    }
}
