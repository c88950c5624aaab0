use crate::entity::bo::network_config_bo::EthernetField;

/// decides who owns the ethernet form: the operator or the status poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditGuard {
    focused: Option<EthernetField>,
    editing: bool,
    dirty: bool,
    // bumped by every edit
    revision: u64,
}

impl EditGuard {
    pub fn focus(&mut self, field: EthernetField) {
        self.focused = Some(field);
        self.editing = true;
    }

    /// `editing` survives until `settle` runs after the grace period
    pub fn blur(&mut self, field: EthernetField) {
        if self.focused == Some(field) {
            self.focused = None;
        }
    }

    /// deferred check after a blur; returns whether editing is still on
    pub fn settle(&mut self) -> bool {
        if self.focused.is_none() {
            self.editing = false;
        }
        self.editing
    }

    pub fn mark_changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    /// take this before reading the draft that gets saved
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// clears the dirty flag only if nothing was edited since `revision`
    pub fn mark_saved(&mut self, revision: u64) -> bool {
        if self.revision != revision {
            return false;
        }
        self.dirty = false;
        true
    }

    #[cfg(test)]
    pub fn focused(&self) -> Option<EthernetField> {
        self.focused
    }

    #[cfg(test)]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    #[cfg(test)]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn holds_form(&self) -> bool {
        self.editing || self.dirty
    }
}
