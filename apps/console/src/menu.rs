//! # Menu Loops
//!
//! The interactive session: main menu, staff menu, member menu.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Session Flow                                 │
//! │                                                                     │
//! │  Main Menu                                                          │
//! │  ├── 1. Login as Staff ──► credential gate ──► Staff Menu          │
//! │  │       add/remove copies, register/deregister patrons,           │
//! │  │       find contact, list holders of a title                     │
//! │  ├── 2. Login as Member ─► name pair + PIN ──► Member Menu         │
//! │  │       browse, details, borrow, return, holds, top three         │
//! │  └── 3. Exit                                                        │
//! │                                                                     │
//! │  Every action: prompt ──► core operation ──► display result.       │
//! │  Errors are printed and the loop continues; nothing here panics.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::BufRead;

use anyhow::Result;
use tracing::{debug, info, warn};

use marquee_core::{AddOutcome, Item, PatronId, RemoveOutcome, ReturnOutcome};

use crate::display;
use crate::input::Prompter;
use crate::state::LibraryState;

/// Staff credentials. A fixed literal comparison, kept as-is: hardening the
/// staff gate is out of scope for this application.
const STAFF_USERNAME: &str = "staff";
const STAFF_PASSWORD: &str = "today123";

/// How many entries the member-facing most-borrowed ranking shows.
const TOP_BORROWED_COUNT: usize = 3;

// =============================================================================
// Main Menu
// =============================================================================

/// Runs the main menu until the user exits or input closes.
pub fn run_main_menu<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    loop {
        println!("\nMain Menu");
        println!("1. Login as Staff");
        println!("2. Login as Member");
        println!("3. Exit");

        match prompter.menu_choice(3)? {
            1 => staff_login(state, prompter)?,
            2 => member_login(state, prompter)?,
            _ => {
                println!("Exiting...");
                return Ok(());
            }
        }
    }
}

// =============================================================================
// Staff Side
// =============================================================================

fn staff_login<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    let username = prompter.nonempty("Enter staff username: ")?;
    let password = prompter.nonempty("Enter staff password: ")?;

    if username == STAFF_USERNAME && password == STAFF_PASSWORD {
        info!("staff login successful");
        println!("Staff login successful.");
        staff_menu(state, prompter)
    } else {
        debug!("staff login rejected");
        println!("Invalid username or password.");
        Ok(())
    }
}

fn staff_menu<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    loop {
        println!("\nStaff Menu");
        println!("1. Add Item Copies");
        println!("2. Remove Item Copies");
        println!("3. Register New Patron");
        println!("4. Deregister Patron");
        println!("5. Find Patron's Contact Number");
        println!("6. List Patrons Holding a Title");
        println!("7. Return to Main Menu");

        match prompter.menu_choice(7)? {
            1 => staff_add_item(state, prompter)?,
            2 => staff_remove_copies(state, prompter)?,
            3 => staff_register_patron(state, prompter)?,
            4 => staff_deregister_patron(state, prompter)?,
            5 => staff_find_contact(state, prompter)?,
            6 => staff_list_holders(state, prompter)?,
            _ => return Ok(()),
        }
    }
}

fn staff_add_item<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    let title = prompter.title("Enter item title: ")?;
    let genre = prompter.genre()?;
    let classification = prompter.classification()?;
    let duration = prompter.duration("Enter duration (in minutes): ")?;
    let copies = prompter.copy_count("Enter number of copies: ")?;

    debug!(%title, "add item command");
    let outcome = state.with_library_mut(|library| {
        library.add_or_increment(&title, genre, classification, duration, copies)
    });

    match outcome {
        Ok(AddOutcome::Added(_)) => {
            println!("'{}' added to the catalog with {} copies.", title, copies);
        }
        Ok(AddOutcome::CopiesAdded { new_total, .. }) => {
            println!(
                "Added {} copies of '{}' to the catalog ({} total).",
                copies, title, new_total
            );
        }
        Err(reason) => println!("Error: {}", reason),
    }
    Ok(())
}

fn staff_remove_copies<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    let title = prompter.title("Enter item title: ")?;
    let count = prompter.copy_count("Enter number of copies to remove: ")?;

    debug!(%title, count, "remove copies command");
    let outcome = state.with_library_mut(|library| library.remove_copies(&title, count));

    match outcome {
        Ok(RemoveOutcome::CopiesRemoved { remaining }) => {
            println!(
                "Removed {} copies of '{}'; {} remain on the shelf.",
                count, title, remaining
            );
        }
        Ok(RemoveOutcome::TitleDeleted) => {
            println!("'{}' removed from the catalog.", title);
        }
        Ok(RemoveOutcome::RetainedWithActiveLoans) => {
            warn!(%title, "title retained with active loans");
            println!(
                "All shelved copies of '{}' removed. Outstanding loans keep the title on record until they are returned.",
                title
            );
        }
        Err(reason) => println!("Error: {}", reason),
    }
    Ok(())
}

fn staff_register_patron<R: BufRead>(
    state: &LibraryState,
    prompter: &mut Prompter<R>,
) -> Result<()> {
    let first = prompter.name("first name", "Enter first name: ")?;
    let last = prompter.name("last name", "Enter last name: ")?;

    // Existence is checked before asking for the rest, so a duplicate name
    // pair fails fast
    if state.with_library(|library| library.find_patron(&first, &last).is_some()) {
        println!("Patron {} {} is already registered.", first, last);
        return Ok(());
    }

    let contact = prompter.contact_number("Enter contact phone number: ")?;
    let pin = prompter.pin("Enter password: ")?;

    debug!(%first, %last, "register patron command");
    match state.with_library_mut(|library| library.register(&first, &last, &contact, &pin)) {
        Ok(_) => println!("Patron {} {} registered successfully.", first, last),
        Err(reason) => println!("Error: {}", reason),
    }
    Ok(())
}

fn staff_deregister_patron<R: BufRead>(
    state: &LibraryState,
    prompter: &mut Prompter<R>,
) -> Result<()> {
    let first = prompter.name("first name", "Enter patron's first name: ")?;
    let last = prompter.name("last name", "Enter patron's last name: ")?;

    debug!(%first, %last, "deregister patron command");
    match state.with_library_mut(|library| library.deregister(&first, &last)) {
        Ok(()) => println!("Patron {} {} deregistered successfully.", first, last),
        Err(reason) => println!("Error: {}", reason),
    }
    Ok(())
}

fn staff_find_contact<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    let first = prompter.name("first name", "Enter patron's first name: ")?;
    let last = prompter.name("last name", "Enter patron's last name: ")?;

    debug!(%first, %last, "find contact command");
    state.with_library(|library| match library.find_contact(&first, &last) {
        Ok(contact) => println!("Contact number for {} {}: {}", first, last, contact),
        Err(reason) => println!("Error: {}", reason),
    });
    Ok(())
}

fn staff_list_holders<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    let title = prompter.title("Enter item title: ")?;

    debug!(%title, "list holders command");
    state.with_library(|library| match library.patrons_holding(&title) {
        Ok(holders) if holders.is_empty() => {
            println!("No one has borrowed '{}'.", title);
        }
        Ok(holders) => {
            println!("Patrons holding '{}':", title);
            for patron in holders {
                println!("- {} ({})", patron.full_name(), patron.contact_number);
            }
        }
        Err(reason) => println!("Error: {}", reason),
    });
    Ok(())
}

// =============================================================================
// Member Side
// =============================================================================

fn member_login<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    let first = prompter.nonempty("Enter first name: ")?;
    let last = prompter.nonempty("Enter last name: ")?;
    let pin = prompter.nonempty("Enter password: ")?;

    let patron_id = state.with_library(|library| {
        library
            .find_patron(&first, &last)
            .filter(|id| library.patron(*id).is_some_and(|p| p.verify_pin(&pin)))
    });

    match patron_id {
        Some(id) => {
            info!(%first, %last, "member login successful");
            println!("{} {} login successful.", first, last);
            member_menu(state, prompter, id)
        }
        None => {
            debug!(%first, %last, "member login rejected");
            println!("Invalid member credentials.");
            Ok(())
        }
    }
}

fn member_menu<R: BufRead>(
    state: &LibraryState,
    prompter: &mut Prompter<R>,
    patron: PatronId,
) -> Result<()> {
    loop {
        println!("\nMember Menu");
        println!("1. Browse All Items");
        println!("2. Display Item Information");
        println!("3. Borrow an Item");
        println!("4. Return an Item");
        println!("5. List Current Borrowed Items");
        println!("6. Display Top Three Most Borrowed Items");
        println!("7. Return to Main Menu");

        match prompter.menu_choice(7)? {
            1 => member_browse(state),
            2 => member_item_info(state, prompter)?,
            3 => member_borrow(state, prompter, patron)?,
            4 => member_return(state, prompter, patron)?,
            5 => member_list_holds(state, patron),
            6 => member_top_borrowed(state),
            _ => return Ok(()),
        }
    }
}

fn member_browse(state: &LibraryState) {
    debug!("browse catalog command");
    state.with_library(|library| {
        let mut items: Vec<&Item> = library.iter_items().map(|(_, item)| item).collect();
        if items.is_empty() {
            println!("The catalog is empty.");
            return;
        }
        items.sort_by(|a, b| a.title.cmp(&b.title));
        println!("Items currently in the catalog:");
        println!("{}", display::catalog_table(&items));
    });
}

fn member_item_info<R: BufRead>(state: &LibraryState, prompter: &mut Prompter<R>) -> Result<()> {
    let title = prompter.title("Enter item title: ")?;

    debug!(%title, "item info command");
    state.with_library(|library| match library.find_by_title(&title) {
        Some(item) => println!("{}", display::item_details(item)),
        None => println!("Item '{}' not found in the catalog.", title),
    });
    Ok(())
}

fn member_borrow<R: BufRead>(
    state: &LibraryState,
    prompter: &mut Prompter<R>,
    patron: PatronId,
) -> Result<()> {
    let title = prompter.title("Enter item title to borrow: ")?;

    debug!(%title, "borrow command");
    match state.with_library_mut(|library| library.borrow(patron, &title)) {
        Ok(_) => println!("Successfully borrowed '{}'. Enjoy watching!", title),
        Err(reason) => println!("Error: {}", reason),
    }
    Ok(())
}

fn member_return<R: BufRead>(
    state: &LibraryState,
    prompter: &mut Prompter<R>,
    patron: PatronId,
) -> Result<()> {
    let title = prompter.title("Enter item title to return: ")?;

    debug!(%title, "return command");
    match state.with_library_mut(|library| library.give_back(patron, &title)) {
        Ok(ReturnOutcome::Returned) => {
            println!("Successfully returned '{}'. Thank you!", title);
        }
        Ok(ReturnOutcome::CopyCountAnomaly) => {
            warn!(%title, "copy count anomaly on return");
            println!(
                "Returned '{}', but every copy was already on the shelf - copy accounting needs review.",
                title
            );
        }
        Err(reason) => println!("Error: {}", reason),
    }
    Ok(())
}

fn member_list_holds(state: &LibraryState, patron: PatronId) {
    debug!("list holds command");
    state.with_library(|library| match library.items_held_by(patron) {
        Ok(items) if items.is_empty() => {
            println!("You are currently not borrowing any items.");
        }
        Ok(items) => {
            println!("Items currently borrowed:");
            println!("{}", display::holds_table(&items));
        }
        Err(reason) => println!("Error: {}", reason),
    });
}

fn member_top_borrowed(state: &LibraryState) {
    debug!("top borrowed command");
    state.with_library(|library| {
        let top = library.top_borrowed(TOP_BORROWED_COUNT);
        if top.is_empty() {
            println!("No items have been borrowed yet.");
        } else {
            println!("Top {} Most Frequently Borrowed Items:", TOP_BORROWED_COUNT);
            println!("{}", display::top_borrowed_table(&top));
        }
    });
}

// =============================================================================
// Unit Tests
// =============================================================================
