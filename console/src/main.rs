use std::{fs, io, path::Path, process::ExitCode, sync::OnceLock};

use common::{
    pagination::{Arguments, PageInfo},
    DateTime,
};
use console::{
    args::{self, Command},
    config,
    controller::Outcome,
    view::{
        lease_detail::Banner,
        notifications::{State, EMPTY_MESSAGE},
        Event, LeaseDetail, LeaseForm, Notifications, PaymentForm,
        ScreeningPanel,
    },
    Args, Config, Controller, Error, Service,
};
use serde::{de::DeserializeOwned, Serialize};
use service::{
    domain::{
        lease::{renewal, Draft},
        Notification,
    },
    infra::Http,
};
use time::UtcOffset;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().map_err(|e| {
        if !e.use_stderr() {
            e.exit();
        }
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        backend,
        notifications,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    // Must be detected before any thread is spawned.
    let offset = UtcOffset::current_local_offset().unwrap_or_else(|e| {
        log::warn!("failed to detect local offset, using UTC: {e}");
        UtcOffset::UTC
    });
    let now = DateTime::now();

    let http = Http::new(&backend.url, backend.timeout).map_err(|e| {
        log::error!("failed to initialize `Http` backend: {e}");
    })?;
    let mut ctrl = Controller::new(Service::new(http), backend.credential());

    match command {
        Command::Lease(args::Lease::Show { file }) => show_lease(&file, now),
        Command::Lease(args::Lease::Renew {
            file,
            end_date,
            rent_increase,
            notes,
        }) => {
            let draft = renewal::Draft {
                new_end_date: end_date,
                rent_increase,
                notes,
            };
            renew_lease(&mut ctrl, &file, draft).await
        }
        Command::Lease(args::Lease::Create(new)) => {
            create_lease(&mut ctrl, (*new).into(), now).await
        }
        Command::Screen { email } => screen_applicant(&mut ctrl, email).await,
        Command::Notifications(args) => {
            show_notifications(&mut ctrl, args, notifications, offset, now)
                .await
        }
        Command::Payments(args::Payments::Generate { month, year }) => {
            generate_payments(&mut ctrl, (month, year), offset, now).await
        }
    }
    .map_err(|e| log::error!("{e}"))
}

fn show_lease(file: &Path, now: DateTime) -> Result<(), Error> {
    let detail = LeaseDetail::open(read_json(file)?);
    let (Some(lease), Some(banner), Some(days)) =
        (detail.lease(), detail.banner(), detail.days_remaining(now))
    else {
        return Ok(());
    };

    println!("[{banner}] {}", lease.property_name);
    println!("Tenant:           {}", lease.tenant_name);
    println!(
        "Term:             {} .. {} ({days}{})",
        lease.start_date,
        lease.end_date,
        if days.is_overdue() { ", overdue" } else { "" },
    );
    println!("Type:             {}", lease.kind);
    println!("Status:           {}", lease.status);
    println!("Monthly rent:     {}", lease.monthly_rent);
    println!("Security deposit: {}", lease.security_deposit);
    match (lease.terms.pets_allowed, &lease.terms.pet_deposit) {
        (true, Some(deposit)) => {
            println!("Pets:             allowed, {deposit} deposit");
        }
        (true, None) => println!("Pets:             allowed"),
        (false, _) => println!("Pets:             not allowed"),
    }
    println!("Parking spaces:   {}", lease.terms.parking_spaces);
    if !lease.terms.utilities.is_empty() {
        println!("Utilities:        {}", lease.terms.utilities_list());
    }
    println!(
        "Rent due:         day {}, {} late fee after {} days",
        lease.payment_schedule.due_day,
        lease.payment_schedule.late_fee_amount,
        lease.payment_schedule.late_fee_after,
    );
    for doc in &lease.documents {
        println!("Document:         {doc}");
    }
    if let Some(notes) = &lease.renewal_notes {
        println!("Renewal notes:    {notes}");
    }
    if banner == Banner::RenewalDue && detail.can_process_renewal() {
        println!("Renewal can be processed with `lease renew`");
    }
    Ok(())
}

async fn renew_lease(
    ctrl: &mut Controller<Service>,
    file: &Path,
    draft: renewal::Draft,
) -> Result<(), Error> {
    let mut detail = LeaseDetail::open(read_json(file)?);
    *detail
        .open_renewal()
        .map_err(|e| Error::context("cannot renew lease", e))? = draft;

    let events = detail
        .confirm_renewal()
        .map_err(|e| Error::context("cannot renew lease", e))?;
    print_stored(ctrl, events).await
}

async fn create_lease(
    ctrl: &mut Controller<Service>,
    draft: Draft,
    now: DateTime,
) -> Result<(), Error> {
    let mut form = LeaseForm::new();
    form.draft = draft;

    let events = form
        .submit(now)
        .map_err(|e| Error::context("invalid lease", e))?;
    print_stored(ctrl, events).await
}

/// Handles the provided `events`, printing every lease they store.
async fn print_stored(
    ctrl: &mut Controller<Service>,
    events: impl IntoIterator<Item = Event>,
) -> Result<(), Error> {
    for event in events {
        match ctrl.handle(event).await? {
            Outcome::LeaseStored(id) => {
                if let Some(lease) = ctrl.lease(id) {
                    print_json(lease)?;
                }
            }
            Outcome::Done | Outcome::PaymentsGenerated(_) => {}
        }
    }
    Ok(())
}

async fn screen_applicant(
    ctrl: &mut Controller<Service>,
    email: String,
) -> Result<(), Error> {
    let mut panel = ScreeningPanel::new(email);
    if !panel.can_trigger() {
        return Err(Error::new(&"applicant email is required"));
    }

    let credential = ctrl.credential().cloned();
    let Some(pending) = panel.trigger(ctrl.service(), credential) else {
        return Err(Error::new(&panel.failure().unwrap_or("invalid email")));
    };
    log::info!("{}", panel.label());
    let response = pending.await;

    let Some(event) = panel.complete(response) else {
        return Err(Error::context(
            "failed to screen applicant",
            panel.failure().unwrap_or("no response"),
        ));
    };
    _ = ctrl.handle(event).await?;

    if let Some(screening) = panel.result() {
        print_json(screening)?;
    }
    Ok(())
}

async fn show_notifications(
    ctrl: &mut Controller<Service>,
    args: args::Notifications,
    conf: config::Notifications,
    offset: UtcOffset,
    now: DateTime,
) -> Result<(), Error> {
    let args::Notifications {
        file,
        filter,
        first,
        after,
        last,
        before,
        mark_read,
    } = args;

    let page_size = first.or(last).unwrap_or(conf.page_size);
    let page = Arguments::new(
        first,
        after.map(Into::into),
        last,
        before.map(Into::into),
        page_size,
    )
    .ok_or_else(|| Error::new(&"cannot paginate in both directions"))?;

    let mut view = Notifications::new(page_size, offset);
    ctrl.set_notifications(read_json::<Vec<Notification>>(&file)?);

    view.set_filter(filter);
    view.go_to(page);

    if let Some(id) = mark_read {
        let event = ctrl
            .notifications()
            .iter()
            .find(|n| n.id.as_ref() == id.as_str())
            .and_then(|n| view.mark_as_read(n));
        if let Some(event) = event {
            _ = ctrl.handle(event).await?;
            write_json(&file, ctrl.notifications())?;
        }
    }

    match view.render(ctrl.notifications(), now) {
        State::Loading => println!("Loading..."),
        State::Empty => println!("{EMPTY_MESSAGE}"),
        State::Page { rows, info } => {
            for row in rows {
                println!(
                    "{}{} [{}] {} ({})",
                    if row.is_urgent { "! " } else { "  " },
                    row.timestamp,
                    row.id,
                    row.title,
                    row.kind,
                );
                if !row.content.is_empty() {
                    println!("      {}", row.content);
                }
                if row.can_mark_as_read {
                    println!("      mark as read: --mark-read {}", row.id);
                }
            }
            let PageInfo {
                start_cursor,
                end_cursor,
                has_next_page,
                has_previous_page,
            } = info;
            if let Some(cursor) = start_cursor.filter(|_| has_previous_page) {
                println!("previous page: --before {cursor}");
            }
            if let Some(cursor) = end_cursor.filter(|_| has_next_page) {
                println!("next page: --after {cursor}");
            }
        }
    }
    Ok(())
}

async fn generate_payments(
    ctrl: &mut Controller<Service>,
    (month, year): (Option<u8>, Option<i32>),
    offset: UtcOffset,
    now: DateTime,
) -> Result<(), Error> {
    let mut form = PaymentForm::new(now, offset);
    if let Some(month) = month {
        if !form.set_month(month) {
            return Err(Error::new(&format!("`{month}` is not a month")));
        }
    }
    if let Some(year) = year {
        _ = form.set_year(year);
    }
    if !form.period().is_year_hinted() {
        let hint = form.year_hint();
        log::warn!(
            "year {} is outside of {}..={}",
            form.period().year,
            hint.start(),
            hint.end(),
        );
    }

    let Some(event) = form.submit() else {
        return Ok(());
    };
    form.set_processing(true);
    log::info!("{}", form.label());
    let outcome = ctrl.handle(event).await;
    form.set_processing(false);

    if let Outcome::PaymentsGenerated(generation) = outcome? {
        println!(
            "Generated {} rent payments for {}",
            generation.generated,
            form.period(),
        );
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(file: &Path) -> Result<T, Error> {
    let json = fs::read_to_string(file).map_err(|e| {
        Error::context(format_args!("failed to read `{}`", file.display()), e)
    })?;
    serde_json::from_str(&json).map_err(|e| {
        Error::context(format_args!("failed to parse `{}`", file.display()), e)
    })
}

fn write_json<T>(file: &Path, value: &T) -> Result<(), Error>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::context("failed to serialize JSON", e))?;
    fs::write(file, json).map_err(|e| {
        Error::context(format_args!("failed to write `{}`", file.display()), e)
    })
}

fn print_json(value: &impl Serialize) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::context("failed to serialize JSON", e))?;
    println!("{json}");
    Ok(())
}
