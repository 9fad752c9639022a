//! # Admin Subcommand
//!
//! Issuer operations, gated by the admin password (`--password` or
//! `STK_ADMIN_PASSWORD_INPUT`).
//!
//! - `stk admin generate --client <name> --days <n>`
//! - `stk admin list`
//! - `stk admin revoke <id> --yes`

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use stk_core::{LicenseId, Timestamp};

use crate::{license_service, open_inventory, require_confirmation};

/// Arguments for `stk admin`.
#[derive(Args, Debug)]
pub struct AdminArgs {
    /// Admin password.
    #[arg(long, env = "STK_ADMIN_PASSWORD_INPUT", hide_env_values = true)]
    pub password: String,

    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Issue a new license key and record it.
    Generate {
        /// Client the license is issued to.
        #[arg(long)]
        client: String,

        /// Validity in days (at least 1).
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// List issued licenses.
    List,

    /// Revoke an issued license by id.
    Revoke {
        id: String,

        #[arg(long)]
        yes: bool,
    },
}

pub fn run_admin(args: &AdminArgs, data_dir: &Path) -> Result<u8> {
    let service = license_service()?;
    service.verify_admin_password(&args.password)?;
    let mut inv = open_inventory(data_dir)?;
    let now = Timestamp::now();

    match &args.command {
        AdminCommand::Generate { client, days } => {
            let record = inv.issue_license(&service, client, *days, now)?;
            println!("Id:      {}", record.id);
            println!("Client:  {}", record.client_name);
            println!("Expires: {}", record.expiration_date);
            println!("Key:     {}", record.key);
            Ok(0)
        }
        AdminCommand::List => {
            let records = inv.registry().records();
            if records.is_empty() {
                println!("No licenses issued.");
                return Ok(0);
            }
            for r in records {
                let state = if r.is_current(now) { "active" } else { "expired" };
                println!(
                    "{}  {:<24}  {}  {:<7}  {}",
                    r.id, r.client_name, r.expiration_date, state, r.key
                );
            }
            Ok(0)
        }
        AdminCommand::Revoke { id, yes } => {
            let Some(id) = LicenseId::parse(id) else {
                bail!("not a license id: {id:?}");
            };
            require_confirmation(*yes, "revoking a license")?;
            match inv.revoke_license(id)? {
                Some(r) => {
                    println!("Revoked license {} for {}.", r.id, r.client_name);
                    Ok(0)
                }
                None => {
                    println!("No license with id {id}.");
                    Ok(1)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(command: AdminCommand, password: &str) -> AdminArgs {
        AdminArgs {
            password: password.into(),
            command,
        }
    }

    #[test]
    fn wrong_password_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_admin(&admin(AdminCommand::List, "definitely-wrong"), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("admin password"));
    }

    #[test]
    fn malformed_revoke_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = license_service().unwrap();
        let pw = service.secrets().admin_password().to_string();
        let args = admin(
            AdminCommand::Revoke {
                id: "zzz".into(),
                yes: true,
            },
            &pw,
        );
        assert!(run_admin(&args, dir.path()).is_err());
    }

    #[test]
    fn generate_then_revoke() {
        let dir = tempfile::tempdir().unwrap();
        let pw = license_service().unwrap().secrets().admin_password().to_string();

        let gen = admin(
            AdminCommand::Generate {
                client: "Acme".into(),
                days: 10,
            },
            &pw,
        );
        assert_eq!(run_admin(&gen, dir.path()).unwrap(), 0);
        let id = open_inventory(dir.path()).unwrap().registry().records()[0].id;

        let revoke = admin(
            AdminCommand::Revoke {
                id: id.to_string(),
                yes: true,
            },
            &pw,
        );
        assert_eq!(run_admin(&revoke, dir.path()).unwrap(), 0);
        assert_eq!(run_admin(&revoke, dir.path()).unwrap(), 1);
    }

    #[test]
    fn zero_days_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pw = license_service().unwrap().secrets().admin_password().to_string();
        let gen = admin(
            AdminCommand::Generate {
                client: "Acme".into(),
                days: 0,
            },
            &pw,
        );
        assert!(run_admin(&gen, dir.path()).is_err());
    }
}
