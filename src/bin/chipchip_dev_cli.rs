// src/bin/chipchip_dev_cli.rs

use chipchip_engine::api::{Action, CroupierAction, CroupierActionKind, Query, QueryResponse};
use chipchip_engine::config::CroupierConfig;
use chipchip_engine::domain::chips::Chips;
use chipchip_engine::domain::player::Participant;
use chipchip_engine::domain::PlayerId;
use chipchip_engine::engine::actions::{
    ActionType, PlayerAction, PlayerActionKind, ShowdownAction, ShowdownActionKind,
};
use chipchip_engine::engine::events::{EventKind, HandEvent, RoundEvent, ShowdownEvent};
use chipchip_engine::infra::{init_logging, IdGenerator};
use chipchip_engine::lobby::{Croupier, CroupierRuntime};

/// Сколько раздач сыграть перед END.
const HANDS_TO_PLAY: u64 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    println!("chipchip_dev_cli: локальный матч через рантайм крупье…");

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(run())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Участники и крупье
    let ids = IdGenerator::new();
    let participants: Vec<Participant> = ["alice", "bob", "carol", "dave"]
        .iter()
        .map(|name| Participant::new(ids.next_player_id(), *name))
        .collect();
    let owner = participants[0].clone();

    let config = CroupierConfig::new(ids.next_croupier_id(), owner.clone()).with_chips(Chips(200));
    let croupier = Croupier::new(config)?;
    let mut events = croupier.events().subscribe();

    let (tx, handle) = CroupierRuntime::spawn(croupier);

    // 2. Лобби и старт
    for participant in &participants {
        tx.send(CroupierAction::by(owner.id, CroupierActionKind::Arrange(participant.clone())).into())?;
    }
    tx.send(
        CroupierAction::by(
            owner.id,
            CroupierActionKind::Start {
                wager: Chips(5),
                position: None,
            },
        )
        .into(),
    )?;

    // 3. Скриптованные игроки: check, если можно, иначе call.
    //    На шоудауне претендует один игрок по кругу.
    let mut hands_finished = 0u64;
    while let Some(event) = events.recv().await {
        match &event.kind {
            EventKind::Player(_) => continue,
            kind => println!("#{:<5} {}", event.index, serde_json::to_string(kind)?),
        }

        match event.kind {
            EventKind::Round(RoundEvent::Monitored {
                player,
                valid_actions,
            }) => {
                let kind = if valid_actions.contains(&ActionType::Check) {
                    PlayerActionKind::Check
                } else {
                    PlayerActionKind::Call
                };
                tx.send(PlayerAction::new(player.id, kind).into())?;
            }
            EventKind::Showdown(ShowdownEvent::Played) => {
                let claimant: PlayerId =
                    participants[(hands_finished as usize) % participants.len()].id;
                tx.send(ShowdownAction::new(claimant, ShowdownActionKind::In).into())?;
                // END засчитывается от первого участника раздачи, остальные отброшены.
                for participant in &participants {
                    tx.send(ShowdownAction::new(participant.id, ShowdownActionKind::End).into())?;
                }
            }
            EventKind::Hand(HandEvent::Ended { .. }) => {
                hands_finished += 1;
                if hands_finished >= HANDS_TO_PLAY {
                    tx.send(Action::Croupier(CroupierAction::by(owner.id, CroupierActionKind::End)))?;
                    break;
                }
            }
            _ => {}
        }
    }

    drop(tx);
    let croupier = handle.await?;

    // 4. Итоги
    println!();
    println!("================ ИТОГИ =================");
    if let QueryResponse::Players(players) = croupier.query(&Query::Players) {
        for p in players {
            println!("{:>6} {:<8} {:>6}", p.id, p.name, p.chips.0);
        }
    }
    if let QueryResponse::Outcomes(outcomes) = croupier.query(&Query::Outcomes) {
        for (i, outcome) in outcomes.iter().enumerate() {
            println!(
                "раздача {}: победители {:?}, выплаты {:?}",
                i + 1,
                outcome.status.winners,
                outcome.payouts
            );
        }
    }

    Ok(())
}
