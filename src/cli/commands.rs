//! Command registry, dispatch, and the shell context.

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::calendar::{self, BsDate};
use crate::config::{Config, ConfigManager, Language, TimeFormat};
use crate::core::services::{BarChartData, ChartService, DateInput, RecordService, SummaryService};
use crate::ledger::{CalendarSystem, Ledger, Period, RecordKind};

use super::{io as cli_io, output, CliError, CommandError};

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

pub struct CommandEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    handler: fn(&mut ShellContext, &[&str]) -> CommandResult,
}

const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "add",
        summary: "Record an income or expense",
        usage: "add <income|expense> <amount> <category> <Y-M-D> [gregorian|bs]",
        handler: cmd_add,
    },
    CommandEntry {
        name: "list",
        summary: "Show all records in entry order",
        usage: "list",
        handler: cmd_list,
    },
    CommandEntry {
        name: "summary",
        summary: "Totals for the current week, month, or year",
        usage: "summary [week|month|year]",
        handler: cmd_summary,
    },
    CommandEntry {
        name: "chart",
        summary: "Category pie or income/expense bars for a period",
        usage: "chart <pie|bar> [week|month|year]",
        handler: cmd_chart,
    },
    CommandEntry {
        name: "convert",
        summary: "Convert a date between Gregorian and Bikram Sambat",
        usage: "convert [bs] <Y-M-D>",
        handler: cmd_convert,
    },
    CommandEntry {
        name: "config",
        summary: "Show or change shell settings",
        usage: "config [show | set <key> <value>]",
        handler: cmd_config,
    },
    CommandEntry {
        name: "help",
        summary: "List commands or show usage for one",
        usage: "help [command]",
        handler: cmd_help,
    },
    CommandEntry {
        name: "exit",
        summary: "Leave the shell",
        usage: "exit",
        handler: cmd_exit,
    },
];

pub(crate) fn find(name: &str) -> Option<&'static CommandEntry> {
    COMMANDS.iter().find(|entry| entry.name == name)
}

pub(crate) fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|entry| entry.name).collect()
}

/// Session state shared by every command handler.
pub struct ShellContext {
    mode: CliMode,
    pub theme: ColorfulTheme,
    pub ledger: Ledger,
    pub config: Config,
    config_manager: ConfigManager,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self {
            mode,
            theme: ColorfulTheme::default(),
            ledger: Ledger::new("Session"),
            config,
            config_manager,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn prompt(&self) -> String {
        "tracker> ".into()
    }

    pub(crate) fn banner(&self) {
        output::section(self.config.language.app_title());
        cli_io::print_info(format!(
            "Session started at {}. Records live until the shell exits.",
            self.config.time_format.format_time(Local::now().time())
        ));
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(entry) = find(command) {
            match (entry.handler)(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = command_names()
            .into_iter()
            .map(|name| (levenshtein(name, input), name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_hint(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}

/// Reference "current date" consumed from the shell environment; the core
/// itself never reads the clock.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if context.mode() != CliMode::Interactive {
            return Err(CommandError::InvalidArguments(
                "usage: add <income|expense> <amount> <category> <Y-M-D> [gregorian|bs]".into(),
            ));
        }
        return run_add_wizard(context);
    }

    if args.len() < 4 {
        return Err(CommandError::InvalidArguments(
            "usage: add <income|expense> <amount> <category> <Y-M-D> [gregorian|bs]".into(),
        ));
    }

    let kind = parse_kind(args[0])?;
    let calendar = match args.get(4) {
        Some(token) => parse_calendar(token)?,
        None => context.config.default_calendar,
    };
    let (year, month, day) = parse_date_parts(args[3])?;
    let input = date_input(calendar, year, month, day);
    append_record(context, kind, args[1], args[2], input)
}

fn run_add_wizard(context: &mut ShellContext) -> CommandResult {
    let kind_idx = cli_io::prompt_select(&context.theme, "Type", &["Expense", "Income"], 0)?;
    let kind = if kind_idx == 1 {
        RecordKind::Income
    } else {
        RecordKind::Expense
    };
    let amount = cli_io::prompt_text(&context.theme, "Amount")?;
    let category = cli_io::prompt_text(&context.theme, "Category")?;

    let default_calendar = match context.config.default_calendar {
        CalendarSystem::Gregorian => 0,
        CalendarSystem::BikramSambat => 1,
    };
    let calendar_idx = cli_io::prompt_select(
        &context.theme,
        "Calendar",
        &["Gregorian", "Bikram Sambat"],
        default_calendar,
    )?;
    let calendar = if calendar_idx == 1 {
        CalendarSystem::BikramSambat
    } else {
        CalendarSystem::Gregorian
    };

    let date_text = cli_io::prompt_text(
        &context.theme,
        &format!("Date in the {} calendar (Y-M-D)", calendar.label()),
    )?;
    let (year, month, day) = parse_date_parts(&date_text)?;
    let input = date_input(calendar, year, month, day);
    append_record(context, kind, &amount, &category, input)
}

fn append_record(
    context: &mut ShellContext,
    kind: RecordKind,
    amount_text: &str,
    category: &str,
    input: DateInput,
) -> CommandResult {
    RecordService::add(&mut context.ledger, kind, amount_text, category, input)?;

    if let Some(record) = context.ledger.records().last() {
        cli_io::print_success(format!(
            "{} {:.2} ({}) recorded on {}.",
            record.kind.label(),
            record.amount,
            if record.category.is_empty() {
                "uncategorized"
            } else {
                record.category.as_str()
            },
            record.display_date
        ));
        // Echo the other calendar's view, as the entry form's synced pickers did.
        let alternate = match record.calendar {
            CalendarSystem::Gregorian => format!(
                "Bikram Sambat: {}",
                calendar::format_bs(calendar::to_bikram_sambat(record.date))
            ),
            CalendarSystem::BikramSambat => {
                format!("Gregorian: {}", calendar::format_gregorian(record.date))
            }
        };
        cli_io::print_hint(alternate);
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records = RecordService::list(&context.ledger);
    if records.is_empty() {
        cli_io::print_info("No records yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.kind.label().to_string(),
                format!("{:.2}", record.amount),
                record.category.clone(),
                record.display_date.clone(),
                record.calendar.label().to_string(),
            ]
        })
        .collect();
    output::render_table(&["Type", "Amount", "Category", "Date", "Calendar"], &rows);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let period = match args.first() {
        Some(token) => parse_period(token)?,
        None => Period::Week,
    };
    let summary = SummaryService::period_summary(&context.ledger, period, today());
    cli_io::print_info(format!(
        "Total Income: {:.2} | Total Expense: {:.2} | Balance: {:.2}",
        summary.total_income, summary.total_expense, summary.balance
    ));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let style = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: chart <pie|bar> [week|month|year]".into())
    })?;
    let period = match args.get(1) {
        Some(token) => parse_period(token)?,
        None => Period::Week,
    };

    match style.to_lowercase().as_str() {
        "pie" => render_pies(context, period),
        "bar" => {
            let summary = SummaryService::period_summary(&context.ledger, period, today());
            render_bars(ChartService::bar_data(summary, period));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown chart style `{other}`; expected `pie` or `bar`"
        ))),
    }
}

fn render_pies(context: &ShellContext, period: Period) -> CommandResult {
    let records = context.ledger.filter_by_period(period, today());
    for (kind, empty_label) in [
        (RecordKind::Expense, "No Expenses"),
        (RecordKind::Income, "No Income"),
    ] {
        let slices = ChartService::pie_data(records.iter().copied(), kind);
        if slices.is_empty() {
            cli_io::print_info(empty_label);
            continue;
        }
        output::section(format!("{} ({})", plural_label(kind), period.label()));
        for slice in slices {
            let label = if slice.label.is_empty() {
                "(uncategorized)"
            } else {
                slice.label.as_str()
            };
            cli_io::print_info(format!(
                "{label:<16} {:>10.2} {:>5.1}%",
                slice.value, slice.share
            ));
        }
    }
    Ok(())
}

fn plural_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Income => "Income",
        RecordKind::Expense => "Expenses",
    }
}

fn render_bars(bars: BarChartData) {
    output::section(format!("Income vs Expense ({})", bars.period.label()));
    let max = bars.income.max(bars.expense);
    for (label, value) in [("Income", bars.income), ("Expense", bars.expense)] {
        let filled = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = "#".repeat(filled);
        cli_io::print_info(format!("{label:<8} {bar:<width$} {value:.2}", width = BAR_WIDTH));
    }
}

fn cmd_convert(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["bs", date_text] => {
            let (year, month, day) = parse_date_parts(date_text)?;
            let bs = BsDate { year, month, day };
            let date = calendar::to_gregorian(bs)?;
            cli_io::print_info(format!(
                "{} -> {}",
                calendar::format_bs(bs),
                calendar::format_gregorian(date)
            ));
        }
        [date_text] => {
            let (year, month, day) = parse_date_parts(date_text)?;
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "`{date_text}` is not a valid Gregorian date"
                ))
            })?;
            cli_io::print_info(format!(
                "{} -> {}",
                calendar::format_gregorian(date),
                calendar::format_bs(calendar::to_bikram_sambat(date))
            ));
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: convert [bs] <Y-M-D>".into(),
            ))
        }
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            cli_io::print_info(format!("  Language: {}", context.config.language.label()));
            cli_io::print_info(format!(
                "  Time format: {}",
                context.config.time_format.label()
            ));
            cli_io::print_info(format!(
                "  Default calendar: {}",
                context.config.default_calendar.label()
            ));
            cli_io::print_hint(format!("Stored at {}", context.config_manager.path().display()));
            Ok(())
        }
        ["set", key, value] => set_config_value(context, key, value),
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show | set <key> <value>]".into(),
        )),
    }
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    match key.to_lowercase().as_str() {
        "language" => {
            context.config.language = match value.to_lowercase().as_str() {
                "english" => Language::English,
                "nepali" => Language::Nepali,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown language `{other}`; expected `english` or `nepali`"
                    )))
                }
            };
        }
        "time_format" => {
            context.config.time_format = match value.to_lowercase().as_str() {
                "24h" => TimeFormat::TwentyFourHour,
                "12h" => TimeFormat::TwelveHour,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown time format `{other}`; expected `24h` or `12h`"
                    )))
                }
            };
        }
        "default_calendar" => {
            context.config.default_calendar = parse_calendar(value)?;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}`"
            )))
        }
    }
    context.config_manager.save(&context.config)?;
    cli_io::print_success("Configuration updated.");
    Ok(())
}

fn cmd_help(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = find(&name.to_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown command `{name}`"))
        })?;
        cli_io::print_info(format!("{} — {}", entry.name, entry.summary));
        cli_io::print_hint(format!("usage: {}", entry.usage));
    } else {
        output::section("Commands");
        for entry in COMMANDS {
            cli_io::print_info(format!("  {:<8} {}", entry.name, entry.summary));
        }
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn parse_kind(token: &str) -> Result<RecordKind, CommandError> {
    match token.to_lowercase().as_str() {
        "income" => Ok(RecordKind::Income),
        "expense" => Ok(RecordKind::Expense),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown record type `{other}`; expected `income` or `expense`"
        ))),
    }
}

fn parse_period(token: &str) -> Result<Period, CommandError> {
    match token.to_lowercase().as_str() {
        "week" => Ok(Period::Week),
        "month" => Ok(Period::Month),
        "year" => Ok(Period::Year),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown period `{other}`; expected `week`, `month`, or `year`"
        ))),
    }
}

fn parse_calendar(token: &str) -> Result<CalendarSystem, CommandError> {
    match token.to_lowercase().as_str() {
        // The entry form called these calendars "English" and "Nepali".
        "gregorian" | "ad" | "english" => Ok(CalendarSystem::Gregorian),
        "bs" | "nepali" | "bikram-sambat" => Ok(CalendarSystem::BikramSambat),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown calendar `{other}`; expected `gregorian` or `bs`"
        ))),
    }
}

fn parse_date_parts(text: &str) -> Result<(i32, u32, u32), CommandError> {
    let parts: Vec<&str> = text.split(['-', '/']).collect();
    if parts.len() != 3 {
        return Err(CommandError::InvalidArguments(format!(
            "`{text}` should look like 2024-01-15"
        )));
    }
    let year = parts[0].trim().parse::<i32>();
    let month = parts[1].trim().parse::<u32>();
    let day = parts[2].trim().parse::<u32>();
    match (year, month, day) {
        (Ok(year), Ok(month), Ok(day)) => Ok((year, month, day)),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{text}` has non-numeric date parts"
        ))),
    }
}

fn date_input(calendar: CalendarSystem, year: i32, month: u32, day: u32) -> DateInput {
    match calendar {
        CalendarSystem::Gregorian => DateInput::Gregorian { year, month, day },
        CalendarSystem::BikramSambat => DateInput::BikramSambat { year, month, day },
    }
}
