//! Command handlers

use std::sync::Arc;

use anyhow::{Context, bail};
use attendo_client::csv::{export_to_file, parse_bulk_users};
use attendo_client::filter::{
    LeaveFilter, RecordFilter, RosterFilter, department_options, leave_export_row, leave_summary, record_export_row,
    user_export_row,
};
use attendo_client::models::{ProfileUpdate, User};
use attendo_client::view::{breadcrumbs, header_title};
use attendo_client::{
    AttendanceDisplay, AttendanceTracker, AttendoClient, ClientError, Dispatch, DurationStyle, ElapsedTicker,
    LeaveForm, NotificationCenter, NotificationFilter, RoleView, RosterMode, ViewError, format_time_ago,
};
use chrono::Utc;

use crate::cli::{
    Command, LeaveCommand, LeaveFilterArgs, NotificationCommand, ProfileCommand, ReportArgs, RosterArgs,
    SessionCommand, SettingsCommand, TimerStyle, UsersCommand,
};

type Client = AttendoClient;

/// Turn a client error into a user-facing anyhow error
fn alert(err: ClientError) -> anyhow::Error {
    tracing::debug!("request failed: {err}");
    anyhow::anyhow!(err.user_message())
}

pub async fn run(client: Arc<Client>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = client.login(&email, &password).await.map_err(alert)?;
            println!("Logged in as {} ({})", user.name, user.role.label());
        }
        Command::Logout => {
            client.logout()?;
            println!("Logged out");
        }
        Command::Session(cmd) => {
            let user = client
                .restore()
                .await
                .map_err(alert)?
                .ok_or(ViewError::NoSession)
                .context("run `attendo login` first")?;
            run_session(&client, &user, cmd).await?;
        }
    }
    Ok(())
}

async fn run_session(client: &Arc<Client>, user: &User, command: SessionCommand) -> anyhow::Result<()> {
    let view = RoleView::from(user.role);
    let api: &Client = client;

    match command {
        SessionCommand::Whoami => print_user(user),
        SessionCommand::Nav { page } => nav(user, view, page.as_deref()),
        SessionCommand::Dashboard => dashboard(api, view).await?,
        SessionCommand::Status { watch, style } => status(client, watch, style).await?,
        SessionCommand::Clock { action } => {
            let mut tracker = AttendanceTracker::new(api.attendance_status().await.map_err(alert)?);
            tracker.perform(api, action.into()).await.map_err(alert)?;
            println!("{}", tracker.status().status);
        }
        SessionCommand::History => history(api).await?,
        SessionCommand::Leave(cmd) => leave(api, view, cmd).await?,
        SessionCommand::Users(cmd) => users(api, view, cmd).await?,
        SessionCommand::Reports(args) => reports(api, view, args).await?,
        SessionCommand::Notifications(cmd) => notifications(client, cmd).await?,
        SessionCommand::Profile(cmd) => profile(api, user, cmd).await?,
        SessionCommand::Settings(cmd) => settings(api, view, cmd).await?,
    }
    Ok(())
}

/// Fail like the dashboard does when a role opens a page it does not own
fn require_page(view: RoleView, label: &str) -> anyhow::Result<()> {
    view.dispatch(label).into_result()?;
    Ok(())
}

fn print_user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("  id:         {}", user.employee_id);
    println!("  role:       {}", user.role.label());
    println!("  department: {}", user.department);
    println!("  status:     {}", user.status);
}

fn nav(user: &User, view: RoleView, label: Option<&str>) {
    let Some(label) = label else {
        for page in view.pages() {
            println!("{page}");
        }
        return;
    };
    match view.dispatch(label) {
        Dispatch::Render(page) => {
            println!("{}", header_title(user, page));
            println!("{}", breadcrumbs(page).join(" > "));
            if view.needs_admin_data(page) {
                println!("(loads roster and leave data)");
            }
        }
        Dispatch::Forbidden(page) => println!("Not Authorized: {page}"),
    }
}

async fn dashboard(client: &Client, view: RoleView) -> anyhow::Result<()> {
    match view {
        RoleView::Employee => {
            let (status, hours) = tokio::try_join!(client.attendance_status(), client.attendance_hours())
                .map_err(alert)?;
            let display = AttendanceDisplay::derive(&status, Utc::now(), DurationStyle::Labeled);
            println!("Attendance: {}", display.headline());
            println!("Today: {:.2}h worked, {:.2}h overtime", hours.today.worked, hours.today.overtime);
            println!("Week:  {:.2}h worked", hours.week.worked);
            println!("Month: {:.2}h worked", hours.month.worked);
        }
        RoleView::Admin => {
            let stats = client.admin_dashboard().await.map_err(alert)?;
            println!("Employees:        {}", stats.total_employees);
            println!("Present today:    {} ({})", stats.attendance_today_count, stats.present_trend());
            println!("On leave:         {}", stats.on_leave_count);
            println!("Pending requests: {}", stats.pending_requests_count);
        }
        RoleView::SuperAdmin => {
            let stats = client.super_admin_dashboard().await.map_err(alert)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

async fn status(client: &Arc<Client>, watch: bool, style: TimerStyle) -> anyhow::Result<()> {
    let style = match style {
        TimerStyle::Clock => DurationStyle::Clock,
        TimerStyle::Labeled => DurationStyle::Labeled,
    };
    if !watch {
        let status = client.attendance_status().await.map_err(alert)?;
        print_display(&AttendanceDisplay::derive(&status, Utc::now(), style));
        return Ok(());
    }

    let poller = client.poll_attendance_status();
    let ticker = ElapsedTicker::spawn();
    let mut ticks = ticker.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = ticks.changed() => {
                if changed.is_err() || poller.is_finished() {
                    break;
                }
                let now = *ticks.borrow_and_update();
                if let Some(status) = poller.latest() {
                    print_display(&AttendanceDisplay::derive(&status, now, style));
                }
            }
        }
    }
    Ok(())
}

fn print_display(display: &AttendanceDisplay) {
    match display {
        AttendanceDisplay::ClockedOut => println!("Clocked Out"),
        AttendanceDisplay::Working { elapsed, since } => println!("Working {elapsed} (since {since})"),
        AttendanceDisplay::OnBreak { break_elapsed, total_work } => {
            println!("On Break {break_elapsed} (total work {total_work})")
        }
    }
}

async fn history(client: &Client) -> anyhow::Result<()> {
    let entries = client.attendance_history().await.map_err(alert)?;
    for e in entries {
        println!("{:<12} {:<8} {:<8} {:<8} {}", e.date, e.clock_in, e.clock_out, e.hours, e.status);
    }
    Ok(())
}

async fn leave(client: &Client, view: RoleView, cmd: LeaveCommand) -> anyhow::Result<()> {
    match cmd {
        LeaveCommand::Balance => {
            for b in client.my_leave_balance().await.map_err(alert)? {
                println!("{:<15} {:>5} of {:>5} days left", b.leave_type, b.available(), b.total);
            }
        }
        LeaveCommand::List { all, filter } => {
            let requests = if all {
                require_page(view, "Leave Requests")?;
                client.all_leave_requests().await.map_err(alert)?
            } else {
                client.my_leave_requests().await.map_err(alert)?
            };
            let filter = leave_filter(filter);
            for r in filter.apply(&requests) {
                let name = r.employee.as_ref().map(|e| e.name.as_str()).unwrap_or("-");
                println!(
                    "{:<26} {:<20} {:<14} {} -> {} ({}d) {}",
                    r.id, name, r.leave_type, r.from, r.to, r.days, r.status
                );
            }
        }
        LeaveCommand::Apply {
            leave_type,
            from,
            to,
            reason,
            for_user,
        } => {
            let form = LeaveForm::new(leave_type.into(), Some(from), Some(to), reason);
            match for_user {
                Some(user_id) => {
                    require_page(view, "Leave Requests")?;
                    client.add_leave_for(&user_id, &form).await.map_err(alert)?;
                }
                None => client.apply_for_leave(&form).await.map_err(alert)?,
            }
            println!("Leave request submitted ({} days)", form.days());
        }
        LeaveCommand::Review { id, decision } => {
            require_page(view, "Leave Requests")?;
            client.set_leave_status(&id, decision.into()).await.map_err(alert)?;
            println!("Request {id} updated");
        }
        LeaveCommand::Stats => {
            require_page(view, "Leave Requests")?;
            let data = client.load_admin_data().await.map_err(alert)?;
            let summary = leave_summary(&data.users, &data.leave_requests);
            println!("Total present:    {}", summary.total_present);
            println!("Planned leaves:   {}", summary.planned);
            println!("Unplanned leaves: {}", summary.unplanned);
            println!("Pending requests: {}", summary.pending);
        }
        LeaveCommand::Export { filter, out } => {
            require_page(view, "Leave Requests")?;
            let requests = client.all_leave_requests().await.map_err(alert)?;
            let rows: Vec<_> = leave_filter(filter).apply(&requests).into_iter().map(leave_export_row).collect();
            let path = export_to_file(&rows, &out, "leave-requests.csv").await?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn leave_filter(args: LeaveFilterArgs) -> LeaveFilter {
    LeaveFilter {
        status: args.status.map(Into::into),
        search: args.search,
    }
}

fn roster_mode(args: &RosterArgs) -> RosterMode {
    if args.admins { RosterMode::Admin } else { RosterMode::Employee }
}

fn roster_page(mode: RosterMode) -> &'static str {
    match mode {
        RosterMode::Admin => "Admin Management",
        RosterMode::Employee => "Employees",
    }
}

async fn users(client: &Client, view: RoleView, cmd: UsersCommand) -> anyhow::Result<()> {
    match cmd {
        UsersCommand::List(args) => {
            let mode = roster_mode(&args);
            require_page(view, roster_page(mode))?;
            let users = client.list_users(mode).await.map_err(alert)?;
            println!("Departments: {}", department_options(&users).join(", "));
            let filter = RosterFilter {
                department: args.department,
                search: args.search,
            };
            for u in filter.apply(&users) {
                println!(
                    "{:<8} {:<22} {:<28} {:<12} {:<12} {}",
                    u.employee_id,
                    u.name,
                    u.email,
                    u.department,
                    u.role.label(),
                    u.status
                );
            }
        }
        UsersCommand::Export { roster, out } => {
            let mode = roster_mode(&roster);
            require_page(view, roster_page(mode))?;
            let users = client.list_users(mode).await.map_err(alert)?;
            let filter = RosterFilter {
                department: roster.department,
                search: roster.search,
            };
            let rows: Vec<_> = filter.apply(&users).into_iter().map(user_export_row).collect();
            let path = export_to_file(&rows, &out, mode.export_file_name()).await?;
            println!("Wrote {}", path.display());
        }
        UsersCommand::Import { file, admins } => {
            let mode = if admins { RosterMode::Admin } else { RosterMode::Employee };
            require_page(view, roster_page(mode))?;
            if !mode.supports_bulk_upload() {
                bail!("Bulk upload is only available for the {} roster", RosterMode::Employee.label());
            }
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let rows = parse_bulk_users(&text)?;
            let count = rows.len();
            client
                .bulk_add_users(rows)
                .await
                .map_err(|e| anyhow::anyhow!("Bulk upload failed: {}", e.user_message()))?;
            println!("Bulk upload successful! ({count} employees)");
        }
        UsersCommand::Delete { id } => {
            require_page(view, "Employees")?;
            client.delete_user(&id).await.map_err(alert)?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

async fn reports(client: &Client, view: RoleView, args: ReportArgs) -> anyhow::Result<()> {
    require_page(view, "Reports")?;
    let bundle = client.report_bundle().await.map_err(alert)?;
    for card in &bundle.stats {
        println!("{:<24} {:<10} {}", card.title, card.value, card.trend);
    }
    let filter = RecordFilter {
        status: args.status.map(Into::into),
        search: args.search,
    };
    let records = filter.apply(&bundle.records);
    for r in &records {
        let name = r.employee.as_ref().map(|e| e.name.as_str()).unwrap_or_default();
        println!(
            "{:<20} {:<12} {:<6} {:<6} {:<8} {:.2}h",
            name, r.date, r.check_in, r.check_out, r.status, r.production
        );
    }
    if let Some(dir) = args.export {
        let rows: Vec<_> = records.into_iter().map(record_export_row).collect();
        let path = export_to_file(&rows, &dir, "attendance-report.csv").await?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

async fn notifications(client: &Arc<Client>, cmd: NotificationCommand) -> anyhow::Result<()> {
    let api: &Client = client;
    let mut center = NotificationCenter::default();
    match cmd {
        NotificationCommand::List { unread } => {
            center.refresh(api).await.map_err(alert)?;
            let filter = if unread { NotificationFilter::Unread } else { NotificationFilter::All };
            println!("{} unread", center.unread_count());
            let now = Utc::now();
            for n in center.filtered(filter) {
                let marker = if n.read { ' ' } else { '*' };
                println!("{marker} {:<26} {:<14} {}", n.id, format_time_ago(n.created_at, now), n.text);
            }
        }
        NotificationCommand::Read { id } => {
            center.refresh(api).await.map_err(alert)?;
            center.mark_read(api, &id).await.map_err(alert)?;
            println!("{} unread", center.unread_count());
        }
        NotificationCommand::ReadAll => {
            center.refresh(api).await.map_err(alert)?;
            center.mark_all_read(api).await.map_err(alert)?;
            println!("All notifications marked read");
        }
        NotificationCommand::Watch => {
            let poller = client.poll_notifications();
            let mut rx = poller.subscribe();
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = rx.borrow_and_update().clone();
                        if let Some(items) = latest {
                            center.replace(items);
                            println!("{} unread", center.unread_count());
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

async fn profile(client: &Client, user: &User, cmd: ProfileCommand) -> anyhow::Result<()> {
    match cmd {
        ProfileCommand::Show => print_user(user),
        ProfileCommand::Update { name, phone, email } => {
            let update = ProfileUpdate {
                name: name.unwrap_or_else(|| user.name.clone()),
                phone: phone.unwrap_or_else(|| user.phone.clone()),
                email: email.unwrap_or_else(|| user.email.clone()),
            };
            let updated = client.update_profile(&update).await.map_err(alert)?;
            print_user(&updated);
        }
        ProfileCommand::ChangePassword { old, new, confirm } => {
            client.change_password(&old, &new, &confirm).await.map_err(alert)?;
            println!("Password changed");
        }
    }
    Ok(())
}

async fn settings(client: &Client, view: RoleView, cmd: SettingsCommand) -> anyhow::Result<()> {
    if !view.loads_settings() {
        bail!("Not Authorized");
    }
    match cmd {
        SettingsCommand::Show => {
            let settings = client.settings().await.map_err(alert)?;
            println!("Company: {}", settings.company_name);
        }
        SettingsCommand::SetCompanyName { name } => {
            let mut settings = client.settings().await.map_err(alert)?;
            settings.company_name = name;
            client.save_settings(&settings).await.map_err(alert)?;
            println!("Saved");
        }
        SettingsCommand::Company => {
            let company = client.company_settings().await.map_err(alert)?;
            println!("{}", serde_json::to_string_pretty(&company)?);
        }
    }
    Ok(())
}
