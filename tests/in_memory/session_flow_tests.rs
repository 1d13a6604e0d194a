//! Multi-session coordination over shared in-memory infrastructure.

use super::helpers::{engineer, housekeeper, infra, runtime, SharedInfra};
use eyre::ensure;
use roomkeeper::room::domain::{Actor, RoomStatus};
use roomkeeper::workflow::domain::AuditFilter;
use roomkeeper::workflow::ports::AuditRepository;
use roomkeeper::worklog::domain::{TimerState, WorkLogFilter, WorkLogState};
use roomkeeper::worklog::ports::WorkLogRepository;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn sessions_run_independent_timers_over_shared_rooms(
    runtime: io::Result<Runtime>,
    infra: SharedInfra,
    housekeeper: Actor,
    engineer: Actor,
) -> eyre::Result<()> {
    let rt = runtime?;
    let a101 = infra.provision("A101", RoomStatus::Dirty).map_err(|e| eyre::eyre!(e))?;
    let b203 = infra.provision("B203", RoomStatus::Dirty).map_err(|e| eyre::eyre!(e))?;

    let session_a = infra.session();
    let session_b = infra.session();

    rt.block_on(session_a.start_task(
        a101.id(),
        roomkeeper::worklog::domain::TaskType::Cleaning,
        &housekeeper,
    ))?;
    rt.block_on(session_b.start_task(
        b203.id(),
        roomkeeper::worklog::domain::TaskType::Repair,
        &engineer,
    ))?;

    ensure!(session_a.timer_state()? == TimerState::Running);
    ensure!(session_b.timer_state()? == TimerState::Running);

    // Pausing one session leaves the other untouched.
    rt.block_on(session_a.pause_task(&housekeeper))?;
    ensure!(session_a.timer_state()? == TimerState::Paused);
    ensure!(session_b.timer_state()? == TimerState::Running);

    // Both sessions see the same registry state.
    ensure!(infra.registry.get(a101.id())?.status() == RoomStatus::Cleaning);
    ensure!(infra.registry.get(a101.id())?.assigned_to() == Some(housekeeper.id()));
    ensure!(infra.registry.get(b203.id())?.status() == RoomStatus::OutOfOrder);
    ensure!(infra.registry.get(b203.id())?.assigned_to() == Some(engineer.id()));

    rt.block_on(session_a.resume_task(&housekeeper))?;
    let finished_a = rt.block_on(session_a.finish_task(a101.id(), &housekeeper, None))?;
    let finished_b = rt.block_on(session_b.finish_task(b203.id(), &engineer, None))?;

    ensure!(finished_a.room.status() == RoomStatus::VacantClean);
    ensure!(finished_b.room.status() == RoomStatus::Dirty);
    ensure!(session_a.timer_state()? == TimerState::Idle);
    ensure!(session_b.timer_state()? == TimerState::Idle);

    // Two start transitions and two finish transitions were audited.
    ensure!(rt.block_on(infra.audit.query(&AuditFilter::new()))?.len() == 4);

    let records = rt.block_on(infra.work_logs.query(&WorkLogFilter::new()))?;
    ensure!(records.len() == 2);
    ensure!(records.iter().all(|r| r.state == WorkLogState::Finished));
    Ok(())
}

#[rstest]
fn a_session_observes_status_changes_made_by_another(
    runtime: io::Result<Runtime>,
    infra: SharedInfra,
    housekeeper: Actor,
) -> eyre::Result<()> {
    let rt = runtime?;
    let room = infra.provision("A101", RoomStatus::Dirty).map_err(|e| eyre::eyre!(e))?;

    let session_a = infra.session();
    let session_b = infra.session();

    rt.block_on(session_a.change_status(room.id(), RoomStatus::Cleaning, &housekeeper, None))?;

    ensure!(session_b.registry().get(room.id())?.status() == RoomStatus::Cleaning);
    Ok(())
}

#[rstest]
fn notifications_from_all_sessions_land_in_the_shared_center(
    runtime: io::Result<Runtime>,
    infra: SharedInfra,
    housekeeper: Actor,
    engineer: Actor,
) -> eyre::Result<()> {
    let rt = runtime?;
    let a101 = infra.provision("A101", RoomStatus::Dirty).map_err(|e| eyre::eyre!(e))?;
    let b203 = infra.provision("B203", RoomStatus::Occupied).map_err(|e| eyre::eyre!(e))?;

    let session_a = infra.session();
    let session_b = infra.session();

    rt.block_on(session_a.change_status(a101.id(), RoomStatus::Cleaning, &housekeeper, None))?;
    rt.block_on(session_b.change_status(b203.id(), RoomStatus::OutOfOrder, &engineer, None))?;

    let retained = infra.notifications.notifications();
    ensure!(retained.len() == 2);
    ensure!(infra.notifications.unread_count() == 2);

    infra.notifications.mark_all_read();
    ensure!(infra.notifications.unread_count() == 0);
    Ok(())
}
