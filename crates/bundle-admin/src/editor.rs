//! Merchant editing session for a single offer group.
//!
//! The editor owns a working copy and, once the group has been saved or
//! loaded, a [`GroupSnapshot`] of its last persisted content. The state is
//! derived from those two on every read, so the unsaved-changes indicator
//! can never drift from what a save would actually change.
//!
//! Saving is split in two so the caller owns the I/O:
//! [`begin_save`](Editor::begin_save) validates and hands out a
//! [`SaveTicket`]; the caller writes it to the record store and reports
//! back with [`complete_save`](Editor::complete_save) or
//! [`fail_save`](Editor::fail_save).

use crate::{AdminError, GroupSnapshot};
use bundle_commerce::prelude::*;
use serde::{Deserialize, Serialize};

/// Editor states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorState {
    /// Nothing is open.
    NoActiveGroup,
    /// The working copy equals the last saved content.
    Clean,
    /// The working copy differs from the last saved content, or was never saved.
    Dirty,
    /// A save is in flight.
    Saving,
}

impl EditorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorState::NoActiveGroup => "no_active_group",
            EditorState::Clean => "clean",
            EditorState::Dirty => "dirty",
            EditorState::Saving => "saving",
        }
    }
}

/// Which record store call a save needs.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveKind {
    Create,
    Update(GroupId),
}

/// A save handed out by [`Editor::begin_save`].
#[derive(Debug, Clone)]
pub struct SaveTicket {
    session: u64,
    snapshot: GroupSnapshot,
    payload: OfferGroup,
    kind: SaveKind,
}

impl SaveTicket {
    /// The prepared group to write.
    pub fn payload(&self) -> &OfferGroup {
        &self.payload
    }

    pub fn kind(&self) -> &SaveKind {
        &self.kind
    }

    pub fn session(&self) -> u64 {
        self.session
    }
}

/// What happened to the editor when a save came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The result was applied to the open working copy.
    Applied,
    /// The merchant had moved on; the editor was left alone.
    Detached,
}

/// Single-group editor.
#[derive(Debug, Clone)]
pub struct Editor {
    session: u64,
    working: Option<OfferGroup>,
    baseline: Option<GroupSnapshot>,
    saving: bool,
    currency: Currency,
    preview_price: f64,
    preview_choice: Option<ShopperChoice>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl Editor {
    pub fn new(currency: Currency) -> Self {
        Self {
            session: 0,
            working: None,
            baseline: None,
            saving: false,
            currency,
            preview_price: 0.0,
            preview_choice: None,
        }
    }

    pub fn state(&self) -> EditorState {
        match &self.working {
            None => EditorState::NoActiveGroup,
            Some(_) if self.saving => EditorState::Saving,
            Some(_) if self.has_unsaved_changes() => EditorState::Dirty,
            Some(_) => EditorState::Clean,
        }
    }

    /// Whether a save would change persisted state.
    ///
    /// A save writes the prepared form of the working copy, so edits that
    /// preparation undoes (surrounding whitespace, a blank name, gid-style
    /// product ids) do not count.
    pub fn has_unsaved_changes(&self) -> bool {
        match (&self.working, &self.baseline) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(working), Some(baseline)) => {
                if baseline.matches(working) {
                    return false;
                }
                match working.clone().prepare() {
                    Ok(prepared) => !baseline.matches(&prepared),
                    Err(_) => true,
                }
            }
        }
    }

    /// Token identifying the currently open group. Changes on every
    /// select, create and close.
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn working(&self) -> Option<&OfferGroup> {
        self.working.as_ref()
    }

    pub fn baseline(&self) -> Option<&GroupSnapshot> {
        self.baseline.as_ref()
    }

    fn open(&mut self, working: OfferGroup, baseline: Option<GroupSnapshot>) {
        self.session = self.session.wrapping_add(1);
        self.working = Some(working);
        self.baseline = baseline;
        self.saving = false;
        self.preview_choice = None;
    }

    /// Load a persisted group. The editor starts clean.
    pub fn select_group(&mut self, persisted: OfferGroup) {
        let snapshot = GroupSnapshot::capture(&persisted);
        self.open(persisted, Some(snapshot));
    }

    /// Start a fresh draft. It has no baseline, so it starts dirty.
    pub fn create_new(&mut self) {
        self.open(OfferGroup::create_draft(), None);
    }

    /// Close the open group, dropping any unsaved edits.
    pub fn close(&mut self) {
        self.session = self.session.wrapping_add(1);
        self.working = None;
        self.baseline = None;
        self.saving = false;
        self.preview_choice = None;
    }

    /// Mutate the working copy. Allowed while a save is in flight.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut OfferGroup) -> R) -> Result<R, AdminError> {
        let working = self.working.as_mut().ok_or(AdminError::NoActiveGroup)?;
        Ok(f(working))
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), AdminError> {
        let name = name.into();
        self.edit(|g| g.name = name)
    }

    pub fn set_active(&mut self, active: bool) -> Result<(), AdminError> {
        self.edit(|g| g.active = active)
    }

    pub fn set_product_ids<I, S>(&mut self, ids: I) -> Result<(), AdminError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.edit(|g| g.set_product_ids(ids))
    }

    pub fn add_tier(&mut self) -> Result<TierId, AdminError> {
        self.edit(|g| g.add_tier())
    }

    pub fn remove_tier(&mut self, tier_id: &TierId) -> Result<OfferTier, AdminError> {
        let removed = self.edit(|g| g.remove_tier(tier_id))??;
        if let Some(ShopperChoice::Tier(chosen)) = &self.preview_choice {
            if chosen == tier_id {
                self.preview_choice = None;
            }
        }
        Ok(removed)
    }

    pub fn reorder_tiers(&mut self, from: usize, to: usize) -> Result<(), AdminError> {
        Ok(self.edit(|g| g.reorder_tiers(from, to))??)
    }

    /// Edit one tier in place.
    pub fn update_tier(
        &mut self,
        tier_id: &TierId,
        f: impl FnOnce(&mut OfferTier),
    ) -> Result<(), AdminError> {
        let tier_id = tier_id.clone();
        self.edit(move |g| match g.tier_mut(&tier_id) {
            Some(tier) => {
                f(tier);
                Ok(())
            }
            None => Err(AdminError::Validation(format!("unknown tier {}", tier_id))),
        })?
    }

    /// Validate the working copy and hand out a save.
    ///
    /// Validation failures are returned before any state changes.
    pub fn begin_save(&mut self) -> Result<SaveTicket, AdminError> {
        if self.saving {
            return Err(AdminError::SaveInFlight);
        }
        let working = self.working.as_ref().ok_or(AdminError::NoActiveGroup)?;

        let snapshot = GroupSnapshot::capture(working);
        let payload = working.clone().prepare()?;
        let kind = match &payload.id {
            Some(id) => SaveKind::Update(id.clone()),
            None => SaveKind::Create,
        };

        self.saving = true;
        Ok(SaveTicket {
            session: self.session,
            snapshot,
            payload,
            kind,
        })
    }

    /// Apply a successful save.
    ///
    /// The prepared payload, with the store-assigned identity, becomes the
    /// new baseline. If nothing was edited while the save was in flight the
    /// working copy takes that content too; otherwise only the identity is
    /// carried over and the later edits stay dirty.
    pub fn complete_save(&mut self, ticket: SaveTicket, persisted: &OfferGroup) -> SaveOutcome {
        if ticket.session != self.session {
            return SaveOutcome::Detached;
        }
        self.saving = false;

        let mut saved = ticket.payload;
        saved.id = persisted.id.clone();
        saved.created_at = persisted.created_at;
        saved.updated_at = persisted.updated_at;

        if let Some(working) = self.working.as_mut() {
            if ticket.snapshot.matches(working) {
                *working = saved.clone();
            } else {
                working.id = saved.id.clone();
                working.created_at = saved.created_at;
                working.updated_at = saved.updated_at;
            }
        }
        self.baseline = Some(GroupSnapshot::capture(&saved));
        SaveOutcome::Applied
    }

    /// Record a failed save. The working copy is left exactly as it is.
    pub fn fail_save(&mut self, ticket: &SaveTicket) -> SaveOutcome {
        if ticket.session != self.session {
            return SaveOutcome::Detached;
        }
        self.saving = false;
        SaveOutcome::Applied
    }

    /// Reset the working copy to the baseline.
    ///
    /// Returns `false` and does nothing when there is no baseline; a draft
    /// that was never saved should be closed instead.
    pub fn discard(&mut self) -> bool {
        match &self.baseline {
            Some(baseline) if self.working.is_some() => {
                self.working = Some(baseline.group().clone());
                true
            }
            _ => false,
        }
    }

    /// Price used for the admin preview, in minor units.
    pub fn set_preview_price(&mut self, unit_price: f64) {
        self.preview_price = unit_price;
    }

    pub fn choose_preview(&mut self, choice: Option<ShopperChoice>) {
        self.preview_choice = choice;
    }

    /// Price the working copy the way the storefront would.
    pub fn preview(&self) -> Option<TierPricing> {
        self.working.as_ref().map(|g| {
            price_group(
                g,
                self.preview_price,
                self.currency,
                self.preview_choice.as_ref(),
            )
        })
    }
}
