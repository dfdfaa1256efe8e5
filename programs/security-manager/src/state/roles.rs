use anchor_lang::prelude::*;

use crate::constants::{MAX_ADMINS, MAX_AUTHORIZED_CALLERS, MAX_EMERGENCY_RESPONDERS};
use crate::errors::SecurityError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    EmergencyResponder,
    AuthorizedCaller,
}

impl Role {
    fn capacity(self) -> usize {
        match self {
            Role::Admin => MAX_ADMINS,
            Role::EmergencyResponder => MAX_EMERGENCY_RESPONDERS,
            Role::AuthorizedCaller => MAX_AUTHORIZED_CALLERS,
        }
    }

    fn missing(self) -> SecurityError {
        match self {
            Role::Admin => SecurityError::MissingRequiredRole,
            Role::EmergencyResponder => SecurityError::NotEmergencyResponder,
            Role::AuthorizedCaller => SecurityError::NotAuthorizedCaller,
        }
    }
}

/// Membership sets for every role the gate checks.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct RoleRegistry {
    pub admins: Vec<Pubkey>,
    pub emergency_responders: Vec<Pubkey>,
    pub authorized_callers: Vec<Pubkey>,
}

impl RoleRegistry {
    pub const LEN: usize = (4 + 32 * MAX_ADMINS)   // admins
        + (4 + 32 * MAX_EMERGENCY_RESPONDERS)       // emergency_responders
        + (4 + 32 * MAX_AUTHORIZED_CALLERS);        // authorized_callers

    /// The owner starts out as both admin and emergency responder.
    pub fn new(owner: Pubkey) -> Self {
        Self {
            admins: vec![owner],
            emergency_responders: vec![owner],
            authorized_callers: Vec::new(),
        }
    }

    fn members(&self, role: Role) -> &Vec<Pubkey> {
        match role {
            Role::Admin => &self.admins,
            Role::EmergencyResponder => &self.emergency_responders,
            Role::AuthorizedCaller => &self.authorized_callers,
        }
    }

    fn members_mut(&mut self, role: Role) -> &mut Vec<Pubkey> {
        match role {
            Role::Admin => &mut self.admins,
            Role::EmergencyResponder => &mut self.emergency_responders,
            Role::AuthorizedCaller => &mut self.authorized_callers,
        }
    }

    pub fn has_role(&self, principal: &Pubkey, role: Role) -> bool {
        self.members(role).contains(principal)
    }

    /// Guard placed at the top of every role-gated operation.
    pub fn authorize(&self, principal: &Pubkey, role: Role) -> Result<()> {
        if self.has_role(principal, role) {
            Ok(())
        } else {
            Err(role.missing().into())
        }
    }

    /// Returns `false` when the principal already held the role.
    pub fn grant(&mut self, role: Role, principal: Pubkey) -> Result<bool> {
        require!(principal != Pubkey::default(), SecurityError::ZeroAddress);
        if self.has_role(&principal, role) {
            return Ok(false);
        }
        let members = self.members_mut(role);
        require!(members.len() < role.capacity(), SecurityError::RoleCapacityExceeded);
        members.push(principal);
        Ok(true)
    }

    /// Returns `false` when the principal did not hold the role.
    pub fn revoke(&mut self, role: Role, principal: &Pubkey) -> Result<bool> {
        let Some(index) = self.members(role).iter().position(|p| p == principal) else {
            return Ok(false);
        };
        if role == Role::Admin {
            require!(self.admins.len() > 1, SecurityError::LastAdmin);
        }
        self.members_mut(role).remove(index);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn owner_is_seeded_as_admin_and_responder() {
        let owner = Pubkey::new_unique();
        let roles = RoleRegistry::new(owner);

        assert!(roles.has_role(&owner, Role::Admin));
        assert!(roles.has_role(&owner, Role::EmergencyResponder));
        assert!(!roles.has_role(&owner, Role::AuthorizedCaller));
    }

    #[test]
    fn authorize_reports_role_specific_errors() {
        let roles = RoleRegistry::new(Pubkey::new_unique());
        let stranger = Pubkey::new_unique();

        assert_eq!(
            roles.authorize(&stranger, Role::Admin).unwrap_err(),
            Error::from(SecurityError::MissingRequiredRole)
        );
        assert_eq!(
            roles.authorize(&stranger, Role::EmergencyResponder).unwrap_err(),
            Error::from(SecurityError::NotEmergencyResponder)
        );
        assert_eq!(
            roles.authorize(&stranger, Role::AuthorizedCaller).unwrap_err(),
            Error::from(SecurityError::NotAuthorizedCaller)
        );
    }

    #[test]
    fn duplicate_grant_is_a_no_op() {
        let mut roles = RoleRegistry::new(Pubkey::new_unique());
        let responder = Pubkey::new_unique();

        assert!(roles.grant(Role::EmergencyResponder, responder).unwrap());
        assert!(!roles.grant(Role::EmergencyResponder, responder).unwrap());
        assert_eq!(roles.emergency_responders.len(), 2);
    }

    #[test]
    fn zero_address_is_rejected() {
        let mut roles = RoleRegistry::new(Pubkey::new_unique());
        assert_eq!(
            roles.grant(Role::AuthorizedCaller, Pubkey::default()).unwrap_err(),
            Error::from(SecurityError::ZeroAddress)
        );
    }

    #[test]
    fn capacity_is_enforced() {
        let mut roles = RoleRegistry::new(Pubkey::new_unique());
        for _ in 1..MAX_ADMINS {
            roles.grant(Role::Admin, Pubkey::new_unique()).unwrap();
        }
        assert_eq!(
            roles.grant(Role::Admin, Pubkey::new_unique()).unwrap_err(),
            Error::from(SecurityError::RoleCapacityExceeded)
        );
        assert_eq!(roles.admins.len(), MAX_ADMINS);
    }

    #[test]
    fn last_admin_cannot_be_removed() {
        let owner = Pubkey::new_unique();
        let mut roles = RoleRegistry::new(owner);

        assert_eq!(
            roles.revoke(Role::Admin, &owner).unwrap_err(),
            Error::from(SecurityError::LastAdmin)
        );

        let second = Pubkey::new_unique();
        roles.grant(Role::Admin, second).unwrap();
        assert!(roles.revoke(Role::Admin, &owner).unwrap());
        assert!(!roles.has_role(&owner, Role::Admin));
        assert!(roles.has_role(&second, Role::Admin));
    }

    #[test]
    fn revoking_a_non_member_changes_nothing() {
        let mut roles = RoleRegistry::new(Pubkey::new_unique());
        let before = roles.clone();
        assert!(!roles.revoke(Role::AuthorizedCaller, &Pubkey::new_unique()).unwrap());
        assert_eq!(roles, before);
    }
}
