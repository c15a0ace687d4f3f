use crate::config::TransferConfig;
use crate::domain::{
    Error,
    traits::{CommandStream, DeadLetterQueue, OutputRepository},
};
use crate::send_money::{SendMoneyService, SendMoneyUseCase};

use futures::StreamExt;
use tracing::info;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub completed: usize,
    pub rejected: usize,
}

#[derive(Debug)]
pub struct Engine<I, O, D>
where
    I: CommandStream,
    O: OutputRepository,
    D: DeadLetterQueue,
{
    ingestion: I,
    service: SendMoneyService<O>,
    dlq: D,
}

impl<I, O, D> Engine<I, O, D>
where
    I: CommandStream,
    O: OutputRepository,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, output_repository: O, dlq: D, config: TransferConfig) -> Self {
        Self {
            ingestion,
            service: SendMoneyService::new(output_repository, config),
            dlq,
        }
    }

    pub async fn process(&mut self) -> Result<Summary, Error> {
        let mut commands = self.ingestion.stream();
        let mut summary = Summary::default();

        while let Some(command) = commands.next().await {
            let outcome = match command {
                Ok(command) => match self.service.send_money(&command) {
                    Ok(true) => Ok(()),
                    Ok(false) => Err(Error::InsufficientFunds(command.source_account_id())),
                    Err(e) => Err(e),
                },
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => summary.completed += 1,
                Err(e) => {
                    summary.rejected += 1;
                    self.dlq.report(&e);
                }
            }
        }

        info!(
            completed = summary.completed,
            rejected = summary.rejected,
            "Transfer stream processed"
        );
        Ok(summary)
    }

    pub fn output_repository(&self) -> &O {
        self.service.repository()
    }

    pub fn flush(&self) {
        self.service.repository().flush();
    }
}
