use crate::account::{AccountStore, Role};
use crate::{admin, auth, storage};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

pub struct Context {
    pub store: AccountStore,
    pub data_path: PathBuf,
}

fn print_menu() {
    println!();
    println!("Menu:");
    println!("1) Create user");
    println!("2) Login");
    println!("3) List users");
    println!("4) Admin actions");
    println!("5) Save");
    println!("6) Exit");
}

/// Prompt until the user enters a non-empty line. `None` means the user
/// cancelled with Ctrl-C/Ctrl-D; callers drop back to the main menu.
fn prompt_nonempty(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    println!("Please enter something.");
                    continue;
                }
                return Ok(Some(line.to_string()));
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Main menu loop. Owns the process lifecycle: every sub-action returns
/// here, and exit (or EOF) triggers a final save.
pub fn run_menu(mut ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        print_menu();
        match rl.readline("Choose: ") {
            Ok(line) => match line.trim() {
                "1" => create_user(&mut ctx, &mut rl)?,
                "2" => login(&mut ctx, &mut rl)?,
                "3" => list_users(&ctx),
                "4" => admin_actions(&mut ctx, &mut rl)?,
                "5" => save(&ctx),
                "6" => break,
                _ => println!("Invalid choice. Please select 1-6."),
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    // Autosave on exit. A failure here is reported but does not block
    // shutdown; the user chose to leave.
    save(&ctx);
    println!("Goodbye!");
    Ok(())
}

fn create_user(ctx: &mut Context, rl: &mut DefaultEditor) -> Result<()> {
    let Some(username) = prompt_nonempty(rl, "New username: ")? else {
        return Ok(());
    };
    if ctx.store.find(&username).is_some() {
        println!("Username already exists.");
        return Ok(());
    }
    let Some(password) = prompt_nonempty(rl, "New password: ")? else {
        return Ok(());
    };
    match ctx.store.create(&username, &password, Role::Standard) {
        Ok(_) => println!("User '{}' created.", username),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn login(ctx: &mut Context, rl: &mut DefaultEditor) -> Result<()> {
    let Some(username) = prompt_nonempty(rl, "Username: ")? else {
        return Ok(());
    };
    let Some(password) = prompt_nonempty(rl, "Password: ")? else {
        return Ok(());
    };
    match auth::authenticate(&mut ctx.store, &username, &password) {
        Ok(_) => println!("Login successful."),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn list_users(ctx: &Context) {
    println!();
    println!("Users:");
    for account in ctx.store.list() {
        println!(
            "- {} ({}) | active={} | logins={}",
            account.username,
            account.role.label(),
            account.active,
            account.login_count
        );
    }
}

/// Authenticate an admin inline, then run one privileged action. The
/// admin's own login counter increments here like any other login.
fn admin_actions(ctx: &mut Context, rl: &mut DefaultEditor) -> Result<()> {
    let Some(admin_name) = prompt_nonempty(rl, "Admin username: ")? else {
        return Ok(());
    };
    let Some(admin_pw) = prompt_nonempty(rl, "Admin password: ")? else {
        return Ok(());
    };

    match ctx.store.find(&admin_name) {
        Some(account) if account.is_admin() => {}
        _ => {
            println!("That user is not an admin or does not exist.");
            return Ok(());
        }
    }
    if let Err(e) = auth::authenticate(&mut ctx.store, &admin_name, &admin_pw) {
        println!("{}", e);
        return Ok(());
    }

    println!();
    println!("Admin Menu:");
    println!("a) Reset password");
    println!("b) Deactivate user");
    println!("c) Reactivate user");
    println!("d) Back");
    let choice = match rl.readline("Choose: ") {
        Ok(line) => line.trim().to_lowercase(),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    match choice.as_str() {
        "a" => {
            let Some(target) = prompt_nonempty(rl, "Target username: ")? else {
                return Ok(());
            };
            let Some(new_pw) = prompt_nonempty(rl, "New password: ")? else {
                return Ok(());
            };
            match admin::reset_password(&mut ctx.store, Role::Admin, &target, &new_pw) {
                Ok(()) => println!("Password reset for '{}'.", target),
                Err(e) => println!("{}", e),
            }
        }
        "b" => {
            let Some(target) = prompt_nonempty(rl, "Target username: ")? else {
                return Ok(());
            };
            match admin::deactivate(&mut ctx.store, Role::Admin, &target) {
                Ok(()) => println!("User '{}' deactivated.", target),
                Err(e) => println!("{}", e),
            }
        }
        "c" => {
            let Some(target) = prompt_nonempty(rl, "Target username: ")? else {
                return Ok(());
            };
            match admin::reactivate(&mut ctx.store, Role::Admin, &target) {
                Ok(()) => println!("User '{}' reactivated.", target),
                Err(e) => println!("{}", e),
            }
        }
        _ => println!("Back to main menu."),
    }
    Ok(())
}

/// Write the store to disk. I/O failures are reported and the in-memory
/// state stays intact so the user can fix the problem and retry.
fn save(ctx: &Context) {
    match storage::save(&ctx.store, &ctx.data_path) {
        Ok(count) => println!("Saved {} users to {}.", count, ctx.data_path.display()),
        Err(e) => {
            eprintln!("Save failed: {:#}", e);
            eprintln!("Your changes are still in memory; fix the problem and save again.");
        }
    }
}
