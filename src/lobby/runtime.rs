use log::{debug, info};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::commands::Action;
use crate::engine::events::CroupierStage;
use crate::lobby::croupier::Croupier;

/// Отправитель в общий канал действий крупье.
pub type ActionSender = UnboundedSender<Action>;

/// Крупье в собственной tokio-задаче.
///
/// Один писатель на матч: все действия обрабатываются по одному в порядке
/// поступления. Задача завершается, когда все отправители закрыты или
/// крупье перешёл в ENDED, и возвращает крупье.
pub struct CroupierRuntime {
    croupier: Croupier,
    inbox: UnboundedReceiver<Action>,
}

impl CroupierRuntime {
    pub fn spawn(croupier: Croupier) -> (ActionSender, JoinHandle<Croupier>) {
        let (tx, rx) = unbounded_channel();
        let runtime = Self {
            croupier,
            inbox: rx,
        };
        (tx, tokio::spawn(runtime.run()))
    }

    async fn run(mut self) -> Croupier {
        info!("крупье {}: рантайм запущен", self.croupier.id());

        while let Some(action) = self.inbox.recv().await {
            self.croupier.handle(&action);
            if self.croupier.stage() == CroupierStage::Ended {
                debug!("крупье {}: матч окончен, канал закрывается", self.croupier.id());
                break;
            }
        }

        info!("крупье {}: рантайм остановлен", self.croupier.id());
        self.croupier
    }
}
