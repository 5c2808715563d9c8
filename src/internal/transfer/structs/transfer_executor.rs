use tracing::{debug, error, info, warn};

use crate::internal::fingerprint::{fingerprint, fingerprints_match};
use crate::internal::remote::traits::RemoteDirectory;
use crate::internal::task_list::structs::{Task, TaskListStore};
use crate::internal::transfer::enums::{FailurePolicy, TaskOutcome};
use crate::internal::transfer::error::{TaskError, TransferError};
use crate::internal::transfer::functions::write_stream;
use crate::internal::transfer::structs::{
    FailedTask, TransferConfig, TransferSummary,
};

/// 任务列表执行器
///
/// 按列表顺序逐个执行，已完成的任务直接跳过；每完成 `checkpoint_every` 个任务
/// 以及运行结束（无论成功或中止）时，通过 store 保存检查点。
pub struct TransferExecutor<'a> {
    remote: &'a dyn RemoteDirectory,
    store: &'a TaskListStore,
    config: TransferConfig,
}

impl<'a> TransferExecutor<'a> {
    pub fn new(
        remote: &'a dyn RemoteDirectory,
        store: &'a TaskListStore,
    ) -> Self {
        Self { remote, store, config: TransferConfig::default() }
    }

    pub fn with_config(mut self, config: TransferConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// 执行任务列表，原地更新 `done`。
    ///
    /// `FailFast` 策略下，某个任务重试耗尽会中止运行并返回错误；
    /// 该任务及其后的任务保持 `done = false`，检查点已保存，下次运行从这里继续。
    pub async fn run(
        &self,
        tasks: &mut [Task],
    ) -> Result<TransferSummary, TransferError> {
        let total = tasks.len();
        let checkpoint_every = self.config.checkpoint_every.max(1);
        let mut summary = TransferSummary { total, ..Default::default() };
        let mut completed = 0usize;

        info!(total, "开始执行任务列表");

        for index in 0..total {
            let task = &tasks[index];

            if task.done {
                summary.already_done += 1;
                debug!(
                    "跳过: {:05} / {:05}, 文件: {}",
                    index + 1,
                    total,
                    task.local_path.display()
                );
                continue;
            }

            info!(
                "下载中: {:05} / {:05} ({:.2} %)",
                index + 1,
                total,
                index as f64 * 100.0 / total as f64
            );

            match self.run_with_retry(task).await {
                Ok(TaskOutcome::Unchanged) => summary.unchanged += 1,
                Ok(TaskOutcome::Downloaded { bytes }) => {
                    summary.downloaded += 1;
                    summary.bytes_written += bytes;
                }
                Err(e) => match self.config.failure_policy {
                    FailurePolicy::FailFast => {
                        error!(error = %e, "下载失败，中止运行");
                        self.checkpoint(tasks).await;
                        return Err(e);
                    }
                    FailurePolicy::SkipAndContinue => {
                        warn!(error = %e, "下载失败，跳过该任务");
                        let TransferError::RetriesExhausted {
                            remote_id,
                            local_path,
                            attempts,
                            source,
                        } = e;
                        summary.failed.push(FailedTask {
                            remote_id,
                            local_path,
                            attempts,
                            error: source.to_string(),
                        });
                        continue;
                    }
                },
            }

            tasks[index].done = true;
            completed += 1;

            if completed % checkpoint_every == 0 {
                self.checkpoint(tasks).await;
            }
        }

        self.checkpoint(tasks).await;

        info!(
            total,
            already_done = summary.already_done,
            unchanged = summary.unchanged,
            downloaded = summary.downloaded,
            bytes = summary.bytes_written,
            failed = summary.failed.len(),
            "任务列表执行结束"
        );

        Ok(summary)
    }

    /// 单个任务：最多尝试 `max_attempts` 次，第 n 次失败后等待 n × backoff_unit。
    async fn run_with_retry(
        &self,
        task: &Task,
    ) -> Result<TaskOutcome, TransferError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1usize;

        loop {
            match self.run_once(task).await {
                Ok(outcome) => return Ok(outcome),
                Err(source) if attempt >= max_attempts => {
                    return Err(TransferError::RetriesExhausted {
                        remote_id: task.remote_id.clone(),
                        local_path: task.local_path.clone(),
                        attempts: attempt,
                        source,
                    });
                }
                Err(e) => {
                    let delay = self.config.backoff_for(attempt);
                    warn!(
                        id = %task.remote_id,
                        error = %e,
                        "retry [{attempt:02}] in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// 单次尝试：本地指纹一致则不下载，否则拉取内容写盘。
    async fn run_once(&self, task: &Task) -> Result<TaskOutcome, TaskError> {
        let local = fingerprint(&task.local_path).await;
        if fingerprints_match(&local, &task.fingerprint) {
            info!(path = %task.local_path.display(), "本地文件一致，跳过下载");
            return Ok(TaskOutcome::Unchanged);
        }

        debug!(
            id = %task.remote_id,
            md5 = %task.fingerprint,
            path = %task.local_path.display(),
            "下载文件"
        );

        let stream = self.remote.fetch_content(&task.remote_id).await?;
        let bytes =
            write_stream(&task.local_path, stream, &task.fingerprint).await?;

        Ok(TaskOutcome::Downloaded { bytes })
    }

    /// 保存检查点；失败只记录日志，不影响运行
    async fn checkpoint(&self, tasks: &[Task]) {
        if let Err(e) = self.store.save(tasks).await {
            warn!(
                path = %self.store.path().display(),
                error = %e,
                "保存任务列表失败"
            );
        }
    }
}
