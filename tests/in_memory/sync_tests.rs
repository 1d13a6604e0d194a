//! Registry bootstrap and external-change subscription tests.

use super::helpers::{infra, runtime, SharedInfra};
use eyre::ensure;
use mockable::DefaultClock;
use roomkeeper::room::domain::{Room, RoomNumber, RoomStatus};
use roomkeeper::room::services::RoomSyncService;
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn durable_room(number: &str, status: RoomStatus) -> eyre::Result<Room> {
    Ok(Room::new(
        RoomNumber::new(number)?,
        "Main",
        2,
        "suite",
        status,
        &DefaultClock,
    ))
}

#[rstest]
fn bootstrap_loads_the_durable_inventory(
    runtime: io::Result<Runtime>,
    infra: SharedInfra,
) -> eyre::Result<()> {
    let rt = runtime?;
    infra.rooms.insert(durable_room("A101", RoomStatus::Dirty)?)?;
    infra.rooms.insert(durable_room("B203", RoomStatus::Occupied)?)?;

    let sync = RoomSyncService::new(Arc::clone(&infra.rooms), infra.registry.clone());
    let count = rt.block_on(sync.bootstrap())?;

    ensure!(count == 2);
    ensure!(infra.registry.len()? == 2);
    Ok(())
}

#[rstest]
fn bootstrap_discards_stale_registry_content(
    runtime: io::Result<Runtime>,
    infra: SharedInfra,
) -> eyre::Result<()> {
    let rt = runtime?;
    let stale = durable_room("Z999", RoomStatus::Dirty)?;
    infra.registry.upsert(stale.clone())?;
    infra.rooms.insert(durable_room("A101", RoomStatus::Dirty)?)?;

    let sync = RoomSyncService::new(Arc::clone(&infra.rooms), infra.registry.clone());
    rt.block_on(sync.bootstrap())?;

    ensure!(infra.registry.len()? == 1);
    ensure!(infra.registry.get(stale.id()).is_err());
    Ok(())
}

#[rstest]
fn external_changes_reach_the_registry_while_subscribed(
    runtime: io::Result<Runtime>,
    infra: SharedInfra,
) -> eyre::Result<()> {
    let rt = runtime?;
    let room = durable_room("A101", RoomStatus::Dirty)?;
    infra.rooms.insert(room.clone())?;

    let sync = RoomSyncService::new(Arc::clone(&infra.rooms), infra.registry.clone());
    rt.block_on(sync.bootstrap())?;
    let subscription = rt.block_on(sync.subscribe())?;

    let mut changed = room.clone();
    changed.transition_to(RoomStatus::Cleaning, &DefaultClock)?;
    infra.rooms.emit_external_change(changed)?;
    ensure!(infra.registry.get(room.id())?.status() == RoomStatus::Cleaning);

    // After cancelling, further external changes no longer reach the
    // registry.
    rt.block_on(sync.unsubscribe(subscription))?;
    let mut further = infra.registry.get(room.id())?;
    further.transition_to(RoomStatus::VacantClean, &DefaultClock)?;
    infra.rooms.emit_external_change(further)?;
    ensure!(infra.registry.get(room.id())?.status() == RoomStatus::Cleaning);
    Ok(())
}
