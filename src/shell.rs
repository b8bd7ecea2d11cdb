//! Interactive menu over a [`Tracker`].
//!
//! Generic over its input and output so it can be driven by tests.
//! End of input behaves like choosing Exit.

use std::io::{BufRead, Write};

use anyhow::Result;
use yansi::Paint;

use crate::output::table;
use crate::store::Tracker;
use crate::validation::{validate_name, validate_user_id, Role};

const MENU: &str = "\
1. Add New User
2. Scan Card
3. Search Logs
4. Display All Logs
5. Display User Status
6. Display Daily Report
7. Save Data to Binary File
8. Export Data to JSON
9. Clear Daily Logs
10. Clear All Data
11. List Users
0. Exit System";

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    AddUser,
    Scan,
    Search,
    AllLogs,
    UserStatus,
    DailyReport,
    Save,
    Export,
    ClearLogs,
    ClearAll,
    ListUsers,
    Exit,
}

impl MenuChoice {
    fn from_number(n: u32) -> Option<Self> {
        Some(match n {
            1 => Self::AddUser,
            2 => Self::Scan,
            3 => Self::Search,
            4 => Self::AllLogs,
            5 => Self::UserStatus,
            6 => Self::DailyReport,
            7 => Self::Save,
            8 => Self::Export,
            9 => Self::ClearLogs,
            10 => Self::ClearAll,
            11 => Self::ListUsers,
            0 => Self::Exit,
            _ => return None,
        })
    }
}

/// Interactive session bound to a tracker.
pub struct Shell<'a, R, W> {
    tracker: &'a mut Tracker,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Create a shell reading commands from `input`.
    pub fn new(tracker: &'a mut Tracker, input: R, output: W) -> Self {
        Self {
            tracker,
            input,
            output,
        }
    }

    /// Run the menu loop until Exit or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", "========== BADGE ATTENDANCE SYSTEM ==========".bold())?;
        writeln!(
            self.output,
            "Loaded {} users and {} scans.",
            self.tracker.total_users(),
            self.tracker.total_scans()
        )?;

        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(line) = self.prompt("Enter your Choice: ")? else {
                return self.exit();
            };

            let choice = match line.trim().parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    writeln!(self.output, "Error: Invalid input. Please enter a number.")?;
                    continue;
                }
            };

            match MenuChoice::from_number(choice) {
                Some(MenuChoice::AddUser) => self.add_user()?,
                Some(MenuChoice::Scan) => self.scan()?,
                Some(MenuChoice::Search) => self.search()?,
                Some(MenuChoice::AllLogs) => {
                    table::write_all_logs(&mut self.output, &self.tracker.all_logs_sorted())?;
                }
                Some(MenuChoice::UserStatus) => {
                    table::write_user_status(&mut self.output, &self.tracker.user_status_view())?;
                }
                Some(MenuChoice::DailyReport) => {
                    table::write_daily_report(&mut self.output, &self.tracker.daily_report_view())?;
                }
                Some(MenuChoice::Save) => self.save()?,
                Some(MenuChoice::Export) => self.export()?,
                Some(MenuChoice::ClearLogs) => self.clear_logs()?,
                Some(MenuChoice::ClearAll) => self.clear_all()?,
                Some(MenuChoice::ListUsers) => {
                    table::write_users(&mut self.output, self.tracker.store().users())?;
                }
                Some(MenuChoice::Exit) => return self.exit(),
                None => {
                    writeln!(
                        self.output,
                        "Error: Invalid option. Please choose a number between 0-11."
                    )?;
                }
            }
        }
    }

    /// Print a prompt and read one line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn confirm(&mut self, text: &str) -> Result<bool> {
        Ok(self
            .prompt(text)?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
    }

    fn add_user(&mut self) -> Result<()> {
        writeln!(self.output, "\n========== ADD NEW USER ==========")?;

        let id = loop {
            let Some(line) = self.prompt("Enter User ID (3-10 alphanumeric characters): ")? else {
                return Ok(());
            };
            match validate_user_id(&line) {
                Ok(id) if self.tracker.find_user(&id).is_some() => writeln!(
                    self.output,
                    "Error: User ID '{id}' already exists. Please choose a different ID."
                )?,
                Ok(id) => break id,
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        };

        let name = loop {
            let Some(line) = self.prompt("Enter Full Name (2-50 characters): ")? else {
                return Ok(());
            };
            match validate_name(&line) {
                Ok(name) => break name,
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        };

        let role = loop {
            writeln!(self.output, "\nSelect User Role:\n1. Student\n2. Staff\n3. Faculty")?;
            let Some(line) = self.prompt("Enter choice: ")? else {
                return Ok(());
            };
            match line.trim().parse::<u32>().ok().and_then(Role::from_choice) {
                Some(role) => break role,
                None => writeln!(
                    self.output,
                    "Error: Invalid choice. Please select 1, 2, or 3."
                )?,
            }
        };

        writeln!(self.output, "\n========== CONFIRM USER DATA ==========")?;
        writeln!(self.output, "User ID: {id}\nName: {name}\nRole: {role}")?;
        if !self.confirm("Add this user? (y/n): ")? {
            writeln!(self.output, "User addition cancelled.")?;
            return Ok(());
        }

        match self.tracker.add_user(&id, &name, role.as_str()) {
            Ok(()) => writeln!(self.output, "Success: User successfully added to the system!")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(())
    }

    fn scan(&mut self) -> Result<()> {
        writeln!(self.output, "\n========== BADGE SCANNER ==========")?;
        let Some(line) = self.prompt("Enter User ID to scan: ")? else {
            return Ok(());
        };
        let id = line.trim();
        if id.is_empty() {
            writeln!(self.output, "Error: User ID cannot be empty.")?;
            return Ok(());
        }

        match self.tracker.scan(id) {
            Ok(entry) => writeln!(
                self.output,
                "SCAN SUCCESS: {} ({}) - {} at {}",
                entry.user_name,
                entry.user_id,
                entry.action,
                entry.formatted_time()
            )?,
            Err(_) => writeln!(self.output, "ERROR: User ID {id} not found!")?,
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        writeln!(self.output, "\n========== SEARCH USER LOGS ==========")?;
        let Some(line) = self.prompt("Enter User ID to search: ")? else {
            return Ok(());
        };
        let id = line.trim();
        if id.is_empty() {
            writeln!(self.output, "Error: User ID cannot be empty.")?;
            return Ok(());
        }
        table::write_user_logs(&mut self.output, id, &self.tracker.search_logs(id))?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        match self.tracker.save() {
            Ok(()) => writeln!(self.output, "Data saved successfully!")?,
            Err(e) => writeln!(self.output, "Failed to save data: {e}")?,
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        match self.tracker.export_snapshot() {
            Ok(path) => writeln!(
                self.output,
                "Data exported successfully to {}",
                path.display()
            )?,
            Err(e) => writeln!(self.output, "Failed to export data: {e}")?,
        }
        Ok(())
    }

    fn clear_logs(&mut self) -> Result<()> {
        writeln!(self.output, "\nWarning: This will clear all daily logs!")?;
        if self.confirm("Are you sure? (y/n): ")? {
            self.tracker.clear_daily_logs();
            writeln!(self.output, "Daily logs cleared successfully!")?;
        } else {
            writeln!(self.output, "Operation cancelled.")?;
        }
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "\nWarning: This will delete ALL users, logs and status!"
        )?;
        if self.confirm("Are you sure? (y/n): ")? {
            self.tracker.clear_all_data();
            writeln!(self.output, "All data cleared.")?;
        } else {
            writeln!(self.output, "Operation cancelled.")?;
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        writeln!(self.output, "\nSaving data before exit...")?;
        self.save()?;
        self.export()?;
        writeln!(self.output, "========== GOODBYE! ==========")?;
        Ok(())
    }
}
