use std::fs;
use std::path::PathBuf;

use abonilo::chinese::{self, LunarDate, Month, table};
use abonilo::clock::{Clock, SystemClock};
use abonilo::renewal::{self, Subscription};
use abonilo::{Config, Date, Period, PeriodUnit};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[command(name = "abonilo", about = "Subscription renewals with lunar calendar support")]
struct Cli {
    /// JSON config file (all fields optional)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Gregorian date to the lunar calendar
    Lunar {
        /// Date as YYYY-MM-DD
        date: Date,
    },
    /// Convert a lunar date to the Gregorian calendar
    Solar {
        year: i32,
        month: u32,
        day: u32,
        /// The date is in the leap month
        #[arg(long)]
        leap: bool,
    },
    /// Add a period to a date
    Add {
        /// Date as YYYY-MM-DD
        date: Date,
        /// Number of units, may be negative
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        value: i32,
        /// day, month or year
        #[arg(long, default_value = "month")]
        unit: PeriodUnit,
        /// Count months and years in the lunar calendar
        #[arg(long)]
        lunar: bool,
    },
    /// Days from today until a lunar date
    Until {
        year: i32,
        month: u32,
        day: u32,
        /// The date is in the leap month
        #[arg(long)]
        leap: bool,
    },
    /// Leap month and month lengths of a lunar year
    Info { year: i32 },
    /// Renew overdue subscriptions and print the reminder digest
    Sweep {
        /// JSON array of subscription records
        file: PathBuf,
        /// Write renewed expiry dates back to the file
        #[arg(long)]
        write: bool,
        /// Check as of this date instead of today
        #[arg(long)]
        today: Option<Date>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    config.apply_env()?;

    match cli.command {
        Commands::Lunar { date } => {
            let lunar = LunarDate::from_date(date)
                .with_context(|| format!("{date} is outside the lunar table"))?;
            print_lunar(&lunar);
        }
        Commands::Solar {
            year,
            month,
            day,
            leap,
        } => {
            let lunar = LunarDate::new(year, Month::new(month, leap), day);
            let date = chinese::lunar_to_solar(&lunar)
                .with_context(|| format!("{lunar:?} has no Gregorian counterpart"))?;
            println!("{date}");
        }
        Commands::Add {
            date,
            value,
            unit,
            lunar,
        } => {
            let period = Period::new(value, unit);
            let next = if lunar {
                let start = LunarDate::from_date(date)
                    .with_context(|| format!("{date} is outside the lunar table"))?;
                let next = match start.add_period(period) {
                    Ok(next) => next,
                    Err(e) => bail!("{start} + {period}: {e}"),
                };
                print_lunar(&next);
                next.to_date()
                    .with_context(|| format!("{next} has no Gregorian counterpart"))?
            } else {
                date.add_period(period)
                    .with_context(|| format!("{date} + {period} is out of range"))?
            };
            println!("{next}");
        }
        Commands::Until {
            year,
            month,
            day,
            leap,
        } => {
            let lunar = LunarDate::new(year, Month::new(month, leap), day);
            let today = SystemClock.today(config.timezone_offset_minutes);
            let days = chinese::days_until(&lunar, today)
                .with_context(|| format!("{lunar:?} has no Gregorian counterpart"))?;
            println!("{days}");
        }
        Commands::Info { year } => {
            let Some(leap) = table::leap_month(year) else {
                bail!("{year} is outside the lunar table ({:?})", table::YEARS);
            };
            println!("{}", chinese::fmt::year(year));
            for m in 1..=12 {
                let days = table::month_days(year, m).unwrap_or_default();
                println!("{}\t{days}", chinese::fmt::month(Month::Common(m)));
                if m == leap {
                    let days = table::leap_days(year).unwrap_or_default();
                    println!("{}\t{days}", chinese::fmt::month(Month::Leap(m)));
                }
            }
            println!("total\t{}", table::year_days(year).unwrap_or_default());
        }
        Commands::Sweep { file, write, today } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let mut subs: Vec<Subscription> = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", file.display()))?;
            let today = today.unwrap_or_else(|| SystemClock.today(config.timezone_offset_minutes));

            let report = renewal::sweep(&mut subs, today, &config);
            for r in &report.renewed {
                println!("renewed {}: {} -> {}", r.id, r.from, r.to);
            }
            for f in &report.failures {
                eprintln!("failed {}: {}", f.id, f.error);
            }
            if let Some(notice) = renewal::digest(&report.reminders, config.show_lunar) {
                println!("\n{}\n\n{}", notice.title, notice.body);
            }

            if write && !report.renewed.is_empty() {
                let json = serde_json::to_string_pretty(&subs)?;
                fs::write(&file, json + "\n")
                    .with_context(|| format!("writing {}", file.display()))?;
                info!("updated {} records in {}", report.renewed.len(), file.display());
            }
        }
    }
    Ok(())
}

fn print_lunar(lunar: &LunarDate) {
    println!(
        "{}\t{}-{}{:02}-{:02}",
        lunar,
        lunar.year,
        if lunar.is_leap() { "L" } else { "" },
        lunar.month.num(),
        lunar.day
    );
}
