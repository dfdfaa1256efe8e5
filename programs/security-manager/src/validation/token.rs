use anchor_lang::prelude::*;

/// The parts of an account the token check looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenProbe {
    pub key: Pubkey,
    pub lamports: u64,
    pub data_len: usize,
    pub owner: Pubkey,
    pub executable: bool,
}

impl<'info> From<&AccountInfo<'info>> for TokenProbe {
    fn from(info: &AccountInfo<'info>) -> Self {
        Self {
            key: *info.key,
            lamports: info.lamports(),
            data_len: info.data_len(),
            owner: *info.owner,
            executable: info.executable,
        }
    }
}

/// Advisory check that `probe` is a live, program-owned account. Never errors.
pub fn validate_token(probe: &TokenProbe) -> bool {
    if probe.key == Pubkey::default() {
        return false;
    }
    probe.lamports > 0
        && probe.data_len > 0
        && (probe.executable || probe.owner != anchor_lang::system_program::ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mint_probe() -> TokenProbe {
        TokenProbe {
            key: Pubkey::new_unique(),
            lamports: 1_461_600,
            data_len: 82,
            owner: Pubkey::new_unique(),
            executable: false,
        }
    }

    #[test]
    fn zero_address_is_invalid() {
        let probe = TokenProbe { key: Pubkey::default(), ..mint_probe() };
        assert!(!validate_token(&probe));
    }

    #[test]
    fn program_owned_account_is_valid() {
        assert!(validate_token(&mint_probe()));
    }

    #[test]
    fn executable_account_is_valid() {
        let probe = TokenProbe {
            owner: anchor_lang::system_program::ID,
            executable: true,
            ..mint_probe()
        };
        assert!(validate_token(&probe));
    }

    #[test]
    fn empty_or_unfunded_account_is_invalid() {
        assert!(!validate_token(&TokenProbe { data_len: 0, ..mint_probe() }));
        assert!(!validate_token(&TokenProbe { lamports: 0, ..mint_probe() }));
    }

    #[test]
    fn plain_wallet_is_invalid() {
        let wallet = TokenProbe {
            data_len: 0,
            owner: anchor_lang::system_program::ID,
            ..mint_probe()
        };
        assert!(!validate_token(&wallet));
    }

    #[test]
    fn probe_reads_account_info() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 42;
        let mut data = vec![0u8; 82];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        let probe = TokenProbe::from(&info);
        assert_eq!(probe.key, key);
        assert_eq!(probe.data_len, 82);
        assert!(validate_token(&probe));
    }
}
