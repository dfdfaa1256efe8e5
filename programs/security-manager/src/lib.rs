use anchor_lang::prelude::*;

declare_id!("CioXhzQa82XVqiP6rm5YHjRqt8JKdW3sZzBkDJdi7tCi");

pub mod clock;
pub mod constants;
pub mod errors;
pub mod events;
pub mod state;
pub mod validation;


use clock::{SysvarClock, TimeSource};
use constants::{RATE_LIMIT_SEED, SECURITY_MANAGER_SEED};
use events::{
    AutoPauseConfigured, CircuitBreakerConfigured, CircuitBreakerTriggered,
    ContractAuthorizationChanged, EmergencyResponderAdded, RateLimitConfigured, RoleGranted,
    RoleRevoked,
};
use state::{
    CircuitBreaker, Comparison, PauseInfo, RateLimitBucket, Role, SecurityManager, SecurityManagerConfig,
    SecurityStatsView,
};
use validation::TokenProbe;

#[program]
pub mod security_manager {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, config: SecurityManagerConfig) -> Result<()> {
        let now = SysvarClock.unix_timestamp()?;
        let owner = ctx.accounts.owner.key();

        let manager = &mut ctx.accounts.security_manager;
        manager.set_inner(SecurityManager::new(
            owner,
            &config,
            now,
            ctx.bumps.security_manager,
        )?);

        msg!(
            "Security manager initialized. Owner: {} | Breaker: {} / {}s | Rate limit: {} / {}s",
            owner,
            config.max_triggers,
            config.breaker_window_seconds,
            config.rate_limit_max_calls,
            config.rate_limit_window_seconds
        );
        Ok(())
    }

    // =====================
    // Access control
    // =====================

    pub fn add_emergency_responder(ctx: Context<UpdateManager>, responder: Pubkey) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        let manager = &mut ctx.accounts.security_manager;

        if manager.grant_role(&sender, Role::EmergencyResponder, responder)? {
            emit!(EmergencyResponderAdded { responder });
            msg!("Emergency responder added: {}", responder);
        }
        Ok(())
    }

    pub fn remove_emergency_responder(ctx: Context<UpdateManager>, responder: Pubkey) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        let manager = &mut ctx.accounts.security_manager;

        if manager.revoke_role(&sender, Role::EmergencyResponder, &responder)? {
            emit!(RoleRevoked { role: Role::EmergencyResponder, account: responder, sender });
            msg!("Emergency responder removed: {}", responder);
        }
        Ok(())
    }

    pub fn add_admin(ctx: Context<UpdateManager>, admin: Pubkey) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        let manager = &mut ctx.accounts.security_manager;

        if manager.grant_role(&sender, Role::Admin, admin)? {
            emit!(RoleGranted { role: Role::Admin, account: admin, sender });
            msg!("Admin added: {}", admin);
        }
        Ok(())
    }

    pub fn remove_admin(ctx: Context<UpdateManager>, admin: Pubkey) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        let manager = &mut ctx.accounts.security_manager;

        if manager.revoke_role(&sender, Role::Admin, &admin)? {
            emit!(RoleRevoked { role: Role::Admin, account: admin, sender });
            msg!("Admin removed: {}", admin);
        }
        Ok(())
    }

    pub fn authorize_contract(ctx: Context<UpdateManager>, contract: Pubkey, enabled: bool) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        let manager = &mut ctx.accounts.security_manager;

        let changed = if enabled {
            manager.grant_role(&sender, Role::AuthorizedCaller, contract)?
        } else {
            manager.revoke_role(&sender, Role::AuthorizedCaller, &contract)?
        };
        if changed {
            emit!(ContractAuthorizationChanged { contract, enabled });
            msg!("Contract {} authorized: {}", contract, enabled);
        }
        Ok(())
    }

    // =====================
    // Pause controller
    // =====================

    pub fn emergency_pause_system(ctx: Context<UpdateManager>, reason: String) -> Result<()> {
        let actor = ctx.accounts.authority.key();
        let event = ctx
            .accounts
            .security_manager
            .emergency_pause(actor, &reason, &SysvarClock)?;

        emit!(event);
        msg!("System paused by {}: {}", actor, reason);
        Ok(())
    }

    pub fn timed_pause_system(ctx: Context<UpdateManager>, reason: String, duration: i64) -> Result<()> {
        let actor = ctx.accounts.authority.key();
        let event = ctx
            .accounts
            .security_manager
            .timed_pause(actor, &reason, duration, &SysvarClock)?;

        emit!(event);
        msg!("System paused by {} for {}s: {}", actor, duration, reason);
        Ok(())
    }

    pub fn unpause_system(ctx: Context<UpdateManager>) -> Result<()> {
        let actor = ctx.accounts.authority.key();
        let event = ctx.accounts.security_manager.unpause(actor)?;

        emit!(event);
        msg!("System unpaused by {}", actor);
        Ok(())
    }

    /// Guard for protected programs: fails while the system is halted.
    pub fn assert_not_paused(ctx: Context<ViewManager>) -> Result<()> {
        ctx.accounts.security_manager.ensure_not_paused(&SysvarClock)
    }

    pub fn get_system_pause_info(ctx: Context<ViewManager>) -> Result<PauseInfo> {
        ctx.accounts.security_manager.pause_info(&SysvarClock)
    }

    // =====================
    // Circuit breaker
    // =====================

    pub fn configure_circuit_breaker(
        ctx: Context<UpdateManager>,
        max_triggers: u32,
        window_duration: i64,
        is_active: bool,
    ) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        ctx.accounts.security_manager.configure_circuit_breaker(
            &sender,
            max_triggers,
            window_duration,
            is_active,
        )?;

        emit!(CircuitBreakerConfigured { max_triggers, window_duration, is_active });
        msg!(
            "Circuit breaker configured. Max: {} triggers / {}s | Active: {}",
            max_triggers,
            window_duration,
            is_active
        );
        Ok(())
    }

    pub fn trigger_circuit_breaker(ctx: Context<UpdateManager>, reason: String) -> Result<bool> {
        let caller = ctx.accounts.authority.key();
        let breaker_identity = ctx.accounts.security_manager.key();
        let trip = ctx.accounts.security_manager.trigger_circuit_breaker(
            &caller,
            breaker_identity,
            &reason,
            &SysvarClock,
        )?;

        emit!(CircuitBreakerTriggered {
            caller,
            reason: reason.clone(),
            trigger_count: trip.trigger_count,
            tripped: trip.tripped,
        });
        if let Some(event) = trip.pause_event {
            emit!(event);
            msg!("Circuit breaker tripped, system paused: {}", reason);
        } else {
            msg!("Circuit breaker trigger recorded. Count: {}", trip.trigger_count);
        }
        Ok(trip.tripped)
    }

    pub fn get_circuit_breaker_stats(ctx: Context<ViewManager>) -> Result<CircuitBreaker> {
        Ok(ctx.accounts.security_manager.circuit_breaker)
    }

    // =====================
    // Rate limiter
    // =====================

    pub fn check_user_rate_limit(ctx: Context<CheckUserRateLimit>, user: Pubkey) -> Result<()> {
        let manager = &ctx.accounts.security_manager;
        let bucket = &mut ctx.accounts.rate_limit_bucket;
        let now = SysvarClock.unix_timestamp()?;

        if !bucket.is_initialized() {
            bucket.init(manager.key(), user, now, ctx.bumps.rate_limit_bucket);
        }
        manager.check_rate_limit(bucket, &SysvarClock)?;

        msg!(
            "Rate limit checked for {}. Used: {}/{} | Window ends in: {}s",
            user,
            bucket.count,
            manager.rate_limit.max_calls,
            bucket.window_ends_in(&manager.rate_limit, now)
        );
        Ok(())
    }

    pub fn configure_rate_limit(ctx: Context<UpdateManager>, max_calls: u64, window_seconds: i64) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        ctx.accounts
            .security_manager
            .configure_rate_limit(&sender, max_calls, window_seconds)?;

        emit!(RateLimitConfigured { max_calls, window_seconds });
        msg!("Rate limit updated. Max: {} calls / {}s", max_calls, window_seconds);
        Ok(())
    }

    pub fn reset_user_rate_limit(ctx: Context<ResetUserRateLimit>, user: Pubkey) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        ctx.accounts.security_manager.reset_rate_limit(
            &sender,
            &mut ctx.accounts.rate_limit_bucket,
            &SysvarClock,
        )?;

        msg!("Rate limit reset by admin for: {}", user);
        Ok(())
    }

    // =====================
    // Validators
    // =====================

    pub fn validate_slippage(
        _ctx: Context<Stateless>,
        amount_in: u64,
        amount_out_min: u64,
        amount_out_max: u64,
        actual_amount_out: u64,
        max_slippage_bps: u16,
    ) -> Result<()> {
        validation::validate_slippage(
            amount_in,
            amount_out_min,
            amount_out_max,
            actual_amount_out,
            max_slippage_bps,
        )
    }

    pub fn validate_token(ctx: Context<ValidateToken>) -> Result<bool> {
        let probe = TokenProbe::from(&ctx.accounts.token.to_account_info());
        Ok(validation::validate_token(&probe))
    }

    // =====================
    // Auto pause
    // =====================

    pub fn configure_auto_pause(
        ctx: Context<UpdateManager>,
        condition_type: String,
        threshold: u128,
        comparison: Comparison,
        enabled: bool,
        cooldown: i64,
    ) -> Result<()> {
        let sender = ctx.accounts.authority.key();
        ctx.accounts.security_manager.configure_auto_pause(
            &sender,
            &condition_type,
            threshold,
            comparison,
            enabled,
            cooldown,
        )?;

        emit!(AutoPauseConfigured {
            condition_type: condition_type.clone(),
            threshold,
            comparison,
            enabled,
            cooldown,
        });
        msg!(
            "Auto-pause {} configured. Threshold: {} ({:?}) | Enabled: {} | Cooldown: {}s",
            condition_type,
            threshold,
            comparison,
            enabled,
            cooldown
        );
        Ok(())
    }

    pub fn report_metric(ctx: Context<UpdateManager>, condition_type: String, observed: u128) -> Result<bool> {
        let caller = ctx.accounts.authority.key();
        let reporter_identity = ctx.accounts.security_manager.key();
        let event = ctx.accounts.security_manager.report_metric(
            &caller,
            reporter_identity,
            &condition_type,
            observed,
            &SysvarClock,
        )?;

        let paused = event.is_some();
        if let Some(event) = event {
            emit!(event);
            msg!("Auto-pause fired: {} observed {}", condition_type, observed);
        }
        Ok(paused)
    }

    pub fn get_security_stats(ctx: Context<ViewManager>) -> Result<SecurityStatsView> {
        ctx.accounts.security_manager.security_stats(&SysvarClock)
    }
}

// =====================
// Account Contexts
// =====================

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = SecurityManager::LEN,
        seeds = [SECURITY_MANAGER_SEED, owner.key().as_ref()],
        bump
    )]
    pub security_manager: Account<'info, SecurityManager>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// Any role-gated mutation. The role check itself happens in the handler.
#[derive(Accounts)]
pub struct UpdateManager<'info> {
    #[account(
        mut,
        seeds = [SECURITY_MANAGER_SEED, security_manager.owner.as_ref()],
        bump = security_manager.bump,
    )]
    pub security_manager: Account<'info, SecurityManager>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct ViewManager<'info> {
    #[account(
        seeds = [SECURITY_MANAGER_SEED, security_manager.owner.as_ref()],
        bump = security_manager.bump,
    )]
    pub security_manager: Account<'info, SecurityManager>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct CheckUserRateLimit<'info> {
    #[account(
        seeds = [SECURITY_MANAGER_SEED, security_manager.owner.as_ref()],
        bump = security_manager.bump,
    )]
    pub security_manager: Account<'info, SecurityManager>,
    #[account(
        init_if_needed,
        payer = payer,
        space = RateLimitBucket::LEN,
        seeds = [RATE_LIMIT_SEED, security_manager.key().as_ref(), user.as_ref()],
        bump
    )]
    pub rate_limit_bucket: Account<'info, RateLimitBucket>,
    #[account(mut)]
    pub payer: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct ResetUserRateLimit<'info> {
    #[account(
        seeds = [SECURITY_MANAGER_SEED, security_manager.owner.as_ref()],
        bump = security_manager.bump,
    )]
    pub security_manager: Account<'info, SecurityManager>,
    #[account(
        mut,
        seeds = [RATE_LIMIT_SEED, security_manager.key().as_ref(), user.as_ref()],
        bump = rate_limit_bucket.bump,
    )]
    pub rate_limit_bucket: Account<'info, RateLimitBucket>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct Stateless {}

#[derive(Accounts)]
pub struct ValidateToken<'info> {
    /// CHECK: only inspected, never deserialized or written
    pub token: UncheckedAccount<'info>,
}
