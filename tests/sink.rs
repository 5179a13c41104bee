// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::time::Duration;

use gitmsg::services::sink::TokenSink;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn accumulates_all_tokens_in_full_mode() {
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let sink = TokenSink::new(false, false).with_debounce(Duration::from_millis(1));
    let task = tokio::spawn(sink.drain(rx, cancel.clone()));

    for token in ["feat:", " add", " thing\n", "\nbody"] {
        tx.send(token.to_string()).await.unwrap();
    }
    drop(tx);

    let result = task.await.unwrap();
    assert_eq!(result.text, "feat: add thing\n\nbody");
    assert!(!result.early_stopped);
    assert!(!cancel.is_cancelled());
}

#[tokio::test]
async fn header_only_stops_at_first_newline_and_cancels() {
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let sink = TokenSink::new(true, false).with_debounce(Duration::from_millis(1));
    let task = tokio::spawn(sink.drain(rx, cancel.clone()));

    tx.send("feat: add".to_string()).await.unwrap();
    tx.send(" thing\nBody starts here".to_string()).await.unwrap();
    // Tokens racing in after the cancel must be dropped
    tx.send("late token".to_string()).await.unwrap();
    drop(tx);

    let result = task.await.unwrap();
    assert_eq!(result.text, "feat: add thing");
    assert!(result.early_stopped);
    assert!(cancel.is_cancelled());
}

#[tokio::test]
async fn header_only_without_newline_runs_to_completion() {
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let sink = TokenSink::new(true, false).with_debounce(Duration::from_millis(1));
    let task = tokio::spawn(sink.drain(rx, cancel.clone()));

    tx.send("fix: one".to_string()).await.unwrap();
    tx.send("-liner".to_string()).await.unwrap();
    drop(tx);

    let result = task.await.unwrap();
    assert_eq!(result.text, "fix: one-liner");
    assert!(!result.early_stopped);
    assert!(!cancel.is_cancelled());
}

#[tokio::test]
async fn newline_as_first_character_yields_empty_header() {
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let sink = TokenSink::new(true, false).with_debounce(Duration::from_millis(1));
    let task = tokio::spawn(sink.drain(rx, cancel.clone()));

    tx.send("\nfeat: arrives too late".to_string()).await.unwrap();
    drop(tx);

    let result = task.await.unwrap();
    assert_eq!(result.text, "");
    assert!(result.early_stopped);
}

#[tokio::test]
async fn empty_channel_produces_empty_result() {
    let (tx, rx) = mpsc::channel::<String>(1);
    let cancel = CancellationToken::new();
    let sink = TokenSink::new(false, false);
    drop(tx);

    let result = sink.drain(rx, cancel).await;
    assert_eq!(result.text, "");
    assert!(!result.early_stopped);
}

#[tokio::test]
async fn slow_tokens_still_accumulate_across_debounce_windows() {
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let sink = TokenSink::new(false, false).with_debounce(Duration::from_millis(5));
    let task = tokio::spawn(sink.drain(rx, cancel));

    for token in ["a", "b", "c"] {
        tx.send(token.to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(15)).await;
    }
    drop(tx);

    let result = task.await.unwrap();
    assert_eq!(result.text, "abc");
}
