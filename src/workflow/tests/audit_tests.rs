//! Unit tests for audit entries and the in-memory audit trail.

use crate::room::domain::{Actor, RoomNumber, RoomStatus, StaffId, StaffRole};
use crate::test_support::FixedClock;
use crate::workflow::adapters::memory::InMemoryAuditRepository;
use crate::workflow::domain::{AuditFilter, AuditLogEntry};
use crate::workflow::ports::AuditRepository;
use chrono::Duration;
use eyre::ensure;
use mockable::Clock;

fn entry(
    room: &str,
    actor: &Actor,
    clock: &FixedClock,
) -> eyre::Result<AuditLogEntry> {
    Ok(AuditLogEntry::new(
        RoomNumber::new(room)?,
        actor,
        RoomStatus::Dirty,
        RoomStatus::Cleaning,
        clock.utc(),
    ))
}

fn housekeeper() -> Actor {
    Actor::new(StaffId::new(), "Ana", StaffRole::Housekeeping)
}

#[tokio::test]
async fn query_returns_entries_most_recent_first() -> eyre::Result<()> {
    let trail = InMemoryAuditRepository::new();
    let clock = FixedClock::new();
    let actor = housekeeper();

    let first = entry("A101", &actor, &clock)?;
    trail.append(&first).await?;
    clock.advance_secs(60);
    let second = entry("B203", &actor, &clock)?;
    trail.append(&second).await?;

    let entries = trail.query(&AuditFilter::new()).await?;
    ensure!(entries == vec![second, first]);
    ensure!(trail.len()? == 2);
    ensure!(!trail.is_empty()?);
    Ok(())
}

#[tokio::test]
async fn query_filters_by_room_and_actor() -> eyre::Result<()> {
    let trail = InMemoryAuditRepository::new();
    let clock = FixedClock::new();
    let ana = housekeeper();
    let ben = Actor::new(StaffId::new(), "Ben", StaffRole::Engineering);

    trail.append(&entry("A101", &ana, &clock)?).await?;
    trail.append(&entry("B203", &ana, &clock)?).await?;
    trail.append(&entry("A101", &ben, &clock)?).await?;

    let by_room = trail
        .query(&AuditFilter::new().with_room_number(RoomNumber::new("A101")?))
        .await?;
    ensure!(by_room.len() == 2);
    ensure!(by_room.iter().all(|e| e.room_number().as_str() == "A101"));

    let by_actor = trail
        .query(&AuditFilter::new().with_actor_id(ana.id()))
        .await?;
    ensure!(by_actor.len() == 2);
    ensure!(by_actor.iter().all(|e| e.actor_id() == ana.id()));
    Ok(())
}

#[tokio::test]
async fn date_range_bounds_are_inclusive() -> eyre::Result<()> {
    let trail = InMemoryAuditRepository::new();
    let clock = FixedClock::new();
    let actor = housekeeper();

    let early = entry("A101", &actor, &clock)?;
    trail.append(&early).await?;
    clock.advance_secs(100);
    let late = entry("A101", &actor, &clock)?;
    trail.append(&late).await?;

    let window = AuditFilter::new()
        .with_from(early.recorded_at())
        .with_until(late.recorded_at());
    ensure!(trail.query(&window).await?.len() == 2);

    let after_early = AuditFilter::new().with_from(early.recorded_at() + Duration::seconds(1));
    ensure!(trail.query(&after_early).await? == vec![late]);
    Ok(())
}

#[tokio::test]
async fn append_failure_is_one_shot() -> eyre::Result<()> {
    let trail = InMemoryAuditRepository::new();
    let clock = FixedClock::new();
    let actor = housekeeper();
    let record = entry("A101", &actor, &clock)?;

    trail.fail_next_append();
    ensure!(trail.append(&record).await.is_err());
    ensure!(trail.is_empty()?);

    trail.append(&record).await?;
    ensure!(trail.len()? == 1);
    Ok(())
}

#[test]
fn serialization_omits_absent_notes() -> eyre::Result<()> {
    let clock = FixedClock::new();
    let actor = housekeeper();
    let bare = entry("A101", &actor, &clock)?;

    let value = serde_json::to_value(&bare)?;
    ensure!(value.get("notes").is_none());
    ensure!(value["room_number"] == "A101");
    ensure!(value["from_status"] == "dirty");
    ensure!(value["to_status"] == "cleaning");
    ensure!(value["actor_role"] == "housekeeping");

    let with_notes = bare.with_notes("guest requested late service");
    let annotated = serde_json::to_value(&with_notes)?;
    ensure!(annotated["notes"] == "guest requested late service");

    let round_tripped: AuditLogEntry = serde_json::from_value(annotated)?;
    ensure!(round_tripped == with_notes);
    Ok(())
}
