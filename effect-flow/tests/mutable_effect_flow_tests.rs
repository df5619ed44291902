// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use effect_flow::{EffectError, LifecycleScope, MutableEffectFlow, SubjectError, DEFAULT_REPLAY};
use effect_test_utils::ui_effect::{
    dialog_confirm_delete, navigate_home, navigate_settings, toast_offline, toast_saved,
};
use effect_test_utils::{
    assert_no_element_emitted, assert_stream_ended, collect_n, unwrap_stream, UiEffect,
};
use std::time::Duration;

#[tokio::test]
async fn zero_replay_is_rejected() {
    let scope = LifecycleScope::new();

    let result = MutableEffectFlow::<UiEffect>::new(0, &scope);

    assert!(matches!(
        result,
        Err(EffectError::InvalidConfiguration { .. })
    ));
}

#[tokio::test]
async fn positive_replay_is_accepted() -> anyhow::Result<()> {
    let scope = LifecycleScope::new();

    for replay in [1, 2, 16, 1024] {
        let flow = MutableEffectFlow::<UiEffect>::new(replay, &scope)?;
        assert_eq!(flow.replay_capacity(), replay);
        assert!(!flow.is_closed());
    }
    Ok(())
}

#[tokio::test]
async fn default_replay_is_one() {
    let scope = LifecycleScope::new();

    let flow = MutableEffectFlow::<UiEffect>::with_default_replay(&scope);

    assert_eq!(flow.replay_capacity(), DEFAULT_REPLAY.get());
    assert_eq!(flow.replay_capacity(), 1);
}

#[tokio::test]
async fn value_emitted_before_attach_is_delivered_once() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;

    // Act
    flow.emit(String::from("A"))?;
    let mut first = flow.subscribe()?;

    // Assert
    assert_eq!(unwrap_stream(&mut first, 500).await, "A");
    assert!(flow.replay_cache().is_empty());
    Ok(())
}

#[tokio::test]
async fn reattached_subscriber_only_sees_values_emitted_while_detached() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;
    flow.emit(String::from("A"))?;
    let mut first = flow.subscribe()?;
    assert_eq!(unwrap_stream(&mut first, 500).await, "A");

    // Act
    first.unsubscribe();
    flow.emit(String::from("B"))?;
    let mut second = flow.subscribe()?;

    // Assert
    assert_eq!(unwrap_stream(&mut second, 500).await, "B");
    assert_no_element_emitted(&mut second, 50).await;
    Ok(())
}

#[tokio::test]
async fn values_emitted_while_attached_are_not_replayed_after_reattach() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(2, &scope)?;
    let first = flow.subscribe()?;
    flow.emit(toast_saved())?;
    flow.emit(navigate_home())?;
    assert_eq!(flow.replay_cache(), vec![toast_saved(), navigate_home()]);

    // Act
    drop(first);
    let mut second = flow.subscribe()?;

    // Assert
    assert!(flow.replay_cache().is_empty());
    assert_no_element_emitted(&mut second, 50).await;
    Ok(())
}

#[tokio::test]
async fn attached_subscriber_receives_all_values_in_order() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(2, &scope)?;
    let mut ui = flow.subscribe()?;
    let resets_after_attach = flow.replay_resets();

    // Act
    flow.emit("A")?;
    flow.emit("B")?;
    flow.emit("C")?;

    // Assert
    assert_eq!(collect_n(&mut ui, 3, 500).await, vec!["A", "B", "C"]);
    assert_eq!(flow.replay_resets(), resets_after_attach);
    assert_eq!(flow.replay_cache(), vec!["B", "C"]);
    Ok(())
}

#[tokio::test]
async fn buffer_drops_oldest_past_capacity_while_detached() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(2, &scope)?;

    // Act
    flow.emit(navigate_home())?;
    flow.emit(toast_offline())?;
    flow.emit(dialog_confirm_delete())?;
    let mut ui = flow.subscribe()?;

    // Assert
    assert_eq!(
        collect_n(&mut ui, 2, 500).await,
        vec![toast_offline(), dialog_confirm_delete()]
    );
    Ok(())
}

#[tokio::test]
async fn detach_and_reattach_clears_exactly_twice() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::<UiEffect>::new(1, &scope)?;
    let mut first = flow.subscribe()?;
    let baseline = flow.replay_resets();

    // Act
    first.unsubscribe();
    let _second = flow.subscribe()?;

    // Assert
    assert_eq!(flow.replay_resets() - baseline, 2);
    Ok(())
}

#[tokio::test]
async fn attach_and_detach_that_do_not_cross_zero_do_not_clear() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;
    let _anchor = flow.subscribe()?;
    let baseline = flow.replay_resets();

    // Act
    let extra = flow.subscribe()?;
    flow.emit(toast_saved())?;
    drop(extra);

    // Assert
    assert_eq!(flow.replay_resets(), baseline);
    assert_eq!(flow.replay_cache(), vec![toast_saved()]);
    Ok(())
}

#[tokio::test]
async fn full_cycle_clears_once_per_zero_crossing() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::<UiEffect>::new(1, &scope)?;
    assert_eq!(flow.replay_resets(), 0);

    // Act
    let a = flow.subscribe()?;
    let b = flow.subscribe()?;
    drop(a);
    drop(b);

    // Assert - one clear on 0 -> 1, one on 1 -> 0
    assert_eq!(flow.replay_resets(), 2);
    Ok(())
}

#[tokio::test]
async fn double_unsubscribe_does_not_clear_again() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;
    let mut ui = flow.subscribe()?;
    ui.unsubscribe();
    let after_detach = flow.replay_resets();
    flow.emit(navigate_settings())?;

    // Act
    ui.unsubscribe();
    drop(ui);

    // Assert
    assert_eq!(flow.replay_resets(), after_detach);
    assert_eq!(flow.replay_cache(), vec![navigate_settings()]);
    assert_eq!(flow.subscription_count(), 0);
    Ok(())
}

#[tokio::test]
async fn manual_reset_drops_pending_values() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;
    flow.emit(toast_saved())?;

    // Act
    flow.reset_replay_cache();
    let mut ui = flow.subscribe()?;

    // Assert
    assert_no_element_emitted(&mut ui, 50).await;
    Ok(())
}

#[tokio::test]
async fn read_only_view_shares_state() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;
    let view = flow.as_effect_flow();
    flow.emit(toast_saved())?;

    // Act
    assert_eq!(view.replay_cache(), vec![toast_saved()]);
    let mut ui = view.subscribe()?;

    // Assert
    assert_eq!(unwrap_stream(&mut ui, 500).await, toast_saved());
    assert_eq!(flow.subscription_count(), 1);
    assert_eq!(view.subscription_count(), 1);
    assert!(flow.replay_cache().is_empty());
    Ok(())
}

#[tokio::test]
async fn scope_end_detaches_subscribers_and_closes_flow() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;
    let view = flow.as_effect_flow();
    let mut ui = flow.subscribe()?;

    // Act
    scope.end();

    // Assert
    assert_stream_ended(&mut ui, 500).await;
    assert!(flow.is_closed());
    assert!(view.is_closed());
    assert_eq!(flow.subscription_count(), 0);
    assert_eq!(flow.emit(toast_saved()), Err(SubjectError::Closed));
    assert!(matches!(view.subscribe(), Err(SubjectError::Closed)));
    Ok(())
}

#[tokio::test]
async fn scope_end_clears_values_buffered_without_subscribers() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(2, &scope)?;
    flow.emit(toast_saved())?;
    flow.emit(navigate_home())?;
    assert_eq!(flow.replay_cache(), vec![toast_saved(), navigate_home()]);

    // Act
    scope.end();

    // Assert
    assert!(flow.is_closed());
    assert!(flow.replay_cache().is_empty());
    assert!(flow.as_effect_flow().replay_cache().is_empty());
    Ok(())
}

#[tokio::test]
async fn dropping_every_handle_ends_subscriptions_before_scope_end() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::new(1, &scope)?;
    let view = flow.as_effect_flow();
    let mut ui = view.subscribe()?;
    flow.emit(toast_offline())?;

    // Act
    drop(view);
    drop(flow);

    // Assert
    assert_eq!(unwrap_stream(&mut ui, 500).await, toast_offline());
    assert_stream_ended(&mut ui, 500).await;
    assert!(!scope.is_ended());
    scope.end();
    assert!(scope.is_ended());
    Ok(())
}

#[tokio::test]
async fn scope_end_stops_background_observation() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::<UiEffect>::new(1, &scope)?;
    assert!(flow.is_observing());

    // Act
    scope.end();

    // Assert
    let stopped = tokio::time::timeout(Duration::from_millis(500), async {
        while flow.is_observing() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(stopped.is_ok(), "observation task still running");
    Ok(())
}

#[tokio::test]
async fn flow_created_in_ended_scope_starts_closed() -> anyhow::Result<()> {
    let scope = LifecycleScope::new();
    scope.end();

    let flow = MutableEffectFlow::<UiEffect>::new(1, &scope)?;

    assert!(flow.is_closed());
    assert!(matches!(flow.subscribe(), Err(SubjectError::Closed)));
    Ok(())
}

#[tokio::test]
async fn subscription_count_signal_follows_attach_and_detach() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::<UiEffect>::new(1, &scope)?;
    let mut signal = flow.subscription_count_signal();

    // Act
    let ui = flow.subscribe()?;
    signal.changed().await?;
    let attached = *signal.borrow_and_update();
    drop(ui);
    signal.changed().await?;
    let detached = *signal.borrow_and_update();

    // Assert
    assert_eq!((attached, detached), (1, 0));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_emitters_reach_attached_subscriber_exactly_once() -> anyhow::Result<()> {
    // Arrange
    let scope = LifecycleScope::new();
    let flow = MutableEffectFlow::<(usize, usize)>::new(1, &scope)?;
    let mut ui = flow.subscribe()?;
    let emitters = 4;
    let per_emitter = 100;

    // Act
    let handles: Vec<_> = (0..emitters)
        .map(|emitter| {
            let flow = flow.clone();
            tokio::spawn(async move {
                for seq in 0..per_emitter {
                    flow.emit((emitter, seq)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await?;
    }

    // Assert
    let received = collect_n(&mut ui, emitters * per_emitter, 1000).await;
    for emitter in 0..emitters {
        let sequence: Vec<usize> = received
            .iter()
            .filter(|(e, _)| *e == emitter)
            .map(|(_, seq)| *seq)
            .collect();
        assert_eq!(sequence, (0..per_emitter).collect::<Vec<_>>());
    }
    assert_no_element_emitted(&mut ui, 50).await;
    Ok(())
}
