use std::path::Path;

use crate::task_list::{count_done, Task, TaskListStore};
use crate::tests::{fast_config, md5_hex, staging_leftovers, MockRemote};
use crate::transfer::{
    FailurePolicy, TaskError, TransferConfig, TransferError, TransferExecutor,
};

/// 根目录下 f1..f{count} 五个文件，内容各不相同
fn flat_remote(count: usize) -> MockRemote {
    let mut remote = MockRemote::new().with_folder("R", "root", None);
    for i in 1..=count {
        remote = remote.with_file(
            &format!("f{i}"),
            &format!("file{i}.txt"),
            Some("R"),
            format!("content of file {i}").as_bytes(),
        );
    }
    remote
}

fn flat_tasks(count: usize, dir: &Path) -> Vec<Task> {
    (1..=count)
        .map(|i| {
            Task::pending(
                format!("f{i}"),
                dir.join(format!("file{i}.txt")),
                md5_hex(format!("content of file {i}").as_bytes()),
            )
        })
        .collect()
}

#[tokio::test]
async fn downloads_every_pending_task() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(3);
    let mut tasks = flat_tasks(3, &out);

    let summary = TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.downloaded, 3);
    assert!(summary.is_complete());
    assert_eq!(count_done(&tasks), 3);
    assert_eq!(
        std::fs::read(out.join("file2.txt")).unwrap(),
        b"content of file 2"
    );
    assert!(staging_leftovers(&out).is_empty());

    // 结束时的检查点
    assert_eq!(store.load().await.unwrap(), tasks);
}

#[tokio::test]
async fn second_run_fetches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(3);
    let mut tasks = flat_tasks(3, dir.path());
    let executor = TransferExecutor::new(&remote, &store).with_config(fast_config());

    executor.run(&mut tasks).await.unwrap();
    let summary = executor.run(&mut tasks).await.unwrap();

    assert_eq!(remote.fetch_count(), 3);
    assert_eq!(summary.already_done, 3);
    assert_eq!(summary.downloaded, 0);
}

#[tokio::test]
async fn matching_local_files_are_not_fetched_again() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(3);
    let mut tasks = flat_tasks(3, dir.path());
    let executor = TransferExecutor::new(&remote, &store).with_config(fast_config());

    executor.run(&mut tasks).await.unwrap();
    for task in tasks.iter_mut() {
        task.done = false;
    }
    let summary = executor.run(&mut tasks).await.unwrap();

    assert_eq!(remote.fetch_count(), 3);
    assert_eq!(summary.unchanged, 3);
    assert_eq!(count_done(&tasks), 3);
}

#[tokio::test]
async fn resumes_after_completed_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(5);
    let mut tasks = flat_tasks(5, dir.path());
    tasks[0].done = true;
    tasks[1].done = true;

    let summary = TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap();

    assert_eq!(remote.fetched_ids(), vec!["f3", "f4", "f5"]);
    assert_eq!(summary.already_done, 2);
    assert_eq!(summary.downloaded, 3);
    assert_eq!(count_done(&tasks), 5);
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(1).fail_fetch("f1", 4);
    let mut tasks = flat_tasks(1, dir.path());

    TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap();

    assert_eq!(remote.fetch_count(), 5);
    assert!(tasks[0].done);
}

#[tokio::test]
async fn exhausted_retries_abort_run_and_keep_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(3).fail_fetch("f2", 5);
    let mut tasks = flat_tasks(3, dir.path());

    let err = TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap_err();

    let TransferError::RetriesExhausted { remote_id, attempts, source, .. } = err;
    assert_eq!(remote_id, "f2");
    assert_eq!(attempts, 5);
    assert!(matches!(source, TaskError::Fetch(_)));

    assert_eq!(remote.fetched_ids(), vec!["f1", "f2", "f2", "f2", "f2", "f2"]);
    assert!(tasks[0].done);
    assert!(!tasks[1].done);
    assert!(!tasks[2].done);

    let saved = store.load().await.unwrap();
    assert_eq!(saved, tasks);
}

#[tokio::test]
async fn skip_and_continue_records_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(3).fail_fetch("f2", 5);
    let mut tasks = flat_tasks(3, dir.path());
    let config = TransferConfig {
        failure_policy: FailurePolicy::SkipAndContinue,
        ..fast_config()
    };

    let summary = TransferExecutor::new(&remote, &store)
        .with_config(config)
        .run(&mut tasks)
        .await
        .unwrap();

    assert!(!summary.is_complete());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].remote_id, "f2");
    assert_eq!(summary.failed[0].attempts, 5);
    assert_eq!(summary.downloaded, 2);
    assert_eq!(
        tasks.iter().map(|t| t.done).collect::<Vec<_>>(),
        vec![true, false, true]
    );
}

#[tokio::test]
async fn fingerprint_mismatch_leaves_no_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = MockRemote::new()
        .with_folder("R", "root", None)
        .with_file_fingerprint(
            "x",
            "x.bin",
            Some("R"),
            b"actual bytes",
            "00000000000000000000000000000000",
        );
    let target = dir.path().join("x.bin");
    let mut tasks = vec![Task::pending(
        "x",
        &target,
        "00000000000000000000000000000000",
    )];
    let config = TransferConfig { max_attempts: 2, ..fast_config() };

    let err = TransferExecutor::new(&remote, &store)
        .with_config(config)
        .run(&mut tasks)
        .await
        .unwrap_err();

    let TransferError::RetriesExhausted { attempts, source, .. } = err;
    assert_eq!(attempts, 2);
    assert!(matches!(source, TaskError::FingerprintMismatch { .. }));
    assert!(!target.exists());
    assert!(staging_leftovers(dir.path()).is_empty());
}

#[tokio::test]
async fn broken_stream_is_retried_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(1).break_stream("f1", 2);
    let mut tasks = flat_tasks(1, &out);

    TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap();

    assert_eq!(remote.fetch_count(), 3);
    assert_eq!(std::fs::read(out.join("file1.txt")).unwrap(), b"content of file 1");
    assert!(staging_leftovers(&out).is_empty());
}

#[tokio::test]
async fn broken_stream_on_last_attempt_leaves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = flat_remote(1).break_stream("f1", 5);
    let mut tasks = flat_tasks(1, &out);

    let err = TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap_err();

    let TransferError::RetriesExhausted { source, .. } = err;
    assert!(matches!(source, TaskError::Fetch(_)));
    assert!(!out.join("file1.txt").exists());
    assert!(staging_leftovers(&out).is_empty());
}

#[tokio::test]
async fn sibling_named_like_a_staging_file_survives() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = MockRemote::new()
        .with_folder("R", "root", None)
        .with_file("xp", "x.part", Some("R"), b"i am x.part")
        .with_file("x", "x", Some("R"), b"i am x");
    let mut tasks = vec![
        Task::pending("xp", out.join("x.part"), md5_hex(b"i am x.part")),
        Task::pending("x", out.join("x"), md5_hex(b"i am x")),
    ];
    let executor = TransferExecutor::new(&remote, &store).with_config(fast_config());

    executor.run(&mut tasks).await.unwrap();

    assert_eq!(std::fs::read(out.join("x.part")).unwrap(), b"i am x.part");
    assert_eq!(std::fs::read(out.join("x")).unwrap(), b"i am x");

    // 重新核对：两个文件都还在且内容一致，不需要再下载
    for task in tasks.iter_mut() {
        task.done = false;
    }
    let summary = executor.run(&mut tasks).await.unwrap();

    assert_eq!(summary.unchanged, 2);
    assert_eq!(remote.fetch_count(), 2);
}

#[tokio::test]
async fn empty_fingerprint_always_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskListStore::new(dir.path().join("list.json"));
    let remote = MockRemote::new()
        .with_folder("R", "root", None)
        .with_file_fingerprint("n", "native.txt", Some("R"), b"fresh", "");
    let target = dir.path().join("native.txt");
    std::fs::write(&target, b"stale").unwrap();
    let mut tasks = vec![Task::pending("n", &target, "")];

    let summary = TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap();

    assert_eq!(summary.downloaded, 1);
    assert_eq!(std::fs::read(&target).unwrap(), b"fresh");
}

#[tokio::test]
async fn checkpoints_every_n_completed_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let list_path = dir.path().join("list.json");
    let store = TaskListStore::new(&list_path);
    let remote = flat_remote(10).watch_list(&list_path);
    let mut tasks = flat_tasks(10, &dir.path().join("out"));
    let config = TransferConfig { checkpoint_every: 4, ..fast_config() };

    TransferExecutor::new(&remote, &store)
        .with_config(config)
        .run(&mut tasks)
        .await
        .unwrap();

    assert_eq!(remote.observed_done(), vec![0, 0, 0, 0, 4, 4, 4, 4, 8, 8]);
    assert_eq!(count_done(&store.load().await.unwrap()), 10);
}

#[tokio::test]
async fn checkpoint_failure_does_not_fail_run() {
    let dir = tempfile::tempdir().unwrap();
    // 列表路径是一个目录，保存必然失败
    let list_dir = dir.path().join("list.json");
    std::fs::create_dir(&list_dir).unwrap();
    let store = TaskListStore::new(&list_dir);
    let remote = flat_remote(2);
    let mut tasks = flat_tasks(2, &dir.path().join("out"));

    let summary = TransferExecutor::new(&remote, &store)
        .with_config(fast_config())
        .run(&mut tasks)
        .await
        .unwrap();

    assert_eq!(summary.downloaded, 2);
    assert_eq!(count_done(&tasks), 2);
}

#[test]
fn backoff_grows_linearly() {
    let config = TransferConfig::default();

    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.checkpoint_every, 10);
    assert_eq!(config.backoff_for(1).as_secs(), 5);
    assert_eq!(config.backoff_for(4).as_secs(), 20);
}
