//! Integration tests for the turn-by-turn dialogue flow.
//!
//! These tests drive the public API end to end:
//! 1. A YAML catalogue is loaded from disk with named validators
//! 2. Turns are processed through `ProcessTurnHandler`
//! 3. The host marks actions done as it runs them
//! 4. Independent conversations share one registry concurrently

use std::io::Write;
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;
use proptest::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;

use dialogue_core::adapters::{AsyncFnValidator, RejectIfPresent, ValidatorSet, YamlActionCatalogue};
use dialogue_core::application::{ProcessTurnCommand, ProcessTurnHandler, TurnOutcome};
use dialogue_core::domain::action::{
    ActionDefinition, ActionRegistry, ConstraintGroup, DependencyGroup, EntityRequirement,
};
use dialogue_core::domain::conversation::{
    Conversation, ExtractedEntities, ExtractedEntity, Memory,
};
use dialogue_core::domain::foundation::LocalizedMessages;

// =============================================================================
// Test Infrastructure
// =============================================================================

const SHOP: &str = r#"
actions:
  - name: Greetings
    intent: greetings
    constraints:
      - prompts:
          en: ["How should I call you?"]
          fr: ["Comment dois-je vous appeler ?"]
        entities:
          - { entity: person, alias: name, validator: first-meeting }
  - name: Order
    intent: order
    constraints:
      - prompts: { en: ["What product would you like?"] }
        entities:
          - { entity: number, alias: product }
    dependencies:
      - prompts: { en: ["Let us introduce ourselves first"] }
        actions: [Greetings]
  - name: Delivery
    intent: delivery
    constraints:
      - prompts: { en: ["When should we deliver?"] }
        entities:
          - { entity: datetime, alias: delivery-date, validator: resolve-date }
      - prompts: { en: ["Where should we deliver?"] }
        entities:
          - { entity: location, alias: address }
    dependencies:
      - prompts: { en: ["What would you like delivered?"] }
        actions: [Order]
  - name: Goodbyes
    intent: goodbye
    dependencies:
      - prompts: { en: ["I need to know what you want before..."] }
        actions: [Order]
"#;

fn validators() -> ValidatorSet {
    ValidatorSet::new()
        .with(
            "first-meeting",
            Arc::new(RejectIfPresent::new(
                "name",
                LocalizedMessages::new()
                    .with("en", ["We have met already"])
                    .with("fr", ["Nous nous sommes déjà rencontrés"]),
            )),
        )
        .with(
            "resolve-date",
            Arc::new(AsyncFnValidator::new(|entity: ExtractedEntity, _memory: Memory| {
                async move {
                    tokio::task::yield_now().await;
                    Ok(json!({ "raw": entity.raw, "value": "2026-10-20" }))
                }
                .boxed()
            })),
        )
}

async fn shop_registry() -> Arc<ActionRegistry> {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SHOP.as_bytes()).unwrap();

    let actions = YamlActionCatalogue::new(validators())
        .load(file.path())
        .await
        .unwrap();

    let mut registry = ActionRegistry::new();
    registry.register_all(actions).unwrap();
    registry.check_dependencies().unwrap();
    Arc::new(registry)
}

fn entity(entity_type: &str, raw: &str) -> ExtractedEntities {
    ExtractedEntities::new().with(entity_type, ExtractedEntity::new(raw))
}

fn turn(intent: &str, entities: ExtractedEntities) -> ProcessTurnCommand {
    ProcessTurnCommand::new(intent, entities, "en")
}

// =============================================================================
// Scenario
// =============================================================================

#[tokio::test]
async fn shop_conversation_runs_to_goodbye() {
    let registry = shop_registry().await;
    let handler = ProcessTurnHandler::new(registry.clone());
    let mut conversation = Conversation::new();

    let names: Vec<_> = registry
        .actionable(&conversation)
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["Greetings"]);

    // Greeting fills the name slot
    let result = handler
        .handle(turn("greetings", entity("person", "Jean")), &mut conversation)
        .await
        .unwrap();
    assert_eq!(
        result.outcome,
        TurnOutcome::Ready {
            action: "Greetings".to_string()
        }
    );
    assert_eq!(conversation.memory.get("name"), Some(&json!({ "raw": "Jean" })));
    registry.mark_done("Greetings", &mut conversation).unwrap();

    // Leaving early is blocked on the order
    let result = handler
        .handle(turn("goodbye", ExtractedEntities::new()), &mut conversation)
        .await
        .unwrap();
    assert_eq!(
        result.outcome,
        TurnOutcome::AwaitingDependencies {
            action: "Goodbyes".to_string(),
            missing_actions: vec!["Order".to_string()],
            prompts: vec!["I need to know what you want before...".to_string()],
        }
    );

    // Ordering
    let result = handler
        .handle(turn("order", entity("number", "2")), &mut conversation)
        .await
        .unwrap();
    assert_eq!(
        result.outcome,
        TurnOutcome::Ready {
            action: "Order".to_string()
        }
    );
    let order = registry.get("Order").unwrap();
    registry.mark_done(order, &mut conversation).unwrap();

    // Delivery needs two slots; only the date arrives
    let result = handler
        .handle(turn("delivery", entity("datetime", "tomorrow")), &mut conversation)
        .await
        .unwrap();
    assert_eq!(
        result.outcome,
        TurnOutcome::AwaitingInformation {
            action: "Delivery".to_string(),
            missing_aliases: vec!["address".to_string()],
            prompts: vec!["Where should we deliver?".to_string()],
        }
    );
    assert_eq!(
        conversation.memory.get("delivery-date"),
        Some(&json!({ "raw": "tomorrow", "value": "2026-10-20" }))
    );

    // The address completes it
    let result = handler
        .handle(turn("delivery", entity("location", "Paris")), &mut conversation)
        .await
        .unwrap();
    assert_eq!(
        result.outcome,
        TurnOutcome::Ready {
            action: "Delivery".to_string()
        }
    );
    registry.mark_done("Delivery", &mut conversation).unwrap();

    // Greeting again is a no-op
    let result = handler
        .handle(turn("greetings", entity("person", "Javert")), &mut conversation)
        .await
        .unwrap();
    assert_eq!(
        result.outcome,
        TurnOutcome::AlreadyDone {
            action: "Greetings".to_string()
        }
    );
    assert_eq!(conversation.memory.get("name"), Some(&json!({ "raw": "Jean" })));

    let result = handler
        .handle(turn("goodbye", ExtractedEntities::new()), &mut conversation)
        .await
        .unwrap();
    assert_eq!(
        result.outcome,
        TurnOutcome::Ready {
            action: "Goodbyes".to_string()
        }
    );
    registry.mark_done("Goodbyes", &mut conversation).unwrap();

    assert!(registry.actionable(&conversation).is_empty());
    assert_eq!(
        conversation.done_actions(),
        vec!["Delivery", "Goodbyes", "Greetings", "Order"]
    );
}

#[tokio::test]
async fn rejection_prompts_in_requested_locale() {
    let registry = shop_registry().await;
    let handler = ProcessTurnHandler::new(registry);
    let mut conversation = Conversation::new();
    conversation.memory.insert("name", json!({ "raw": "Jean" }));

    let result = handler
        .handle(
            ProcessTurnCommand::new("greetings", entity("person", "Javert"), "fr"),
            &mut conversation,
        )
        .await
        .unwrap();

    assert_eq!(
        result.outcome,
        TurnOutcome::Rejected {
            action: "Greetings".to_string(),
            alias: "name".to_string(),
            messages: vec!["Nous nous sommes déjà rencontrés".to_string()],
        }
    );
    assert_eq!(conversation.memory.get("name"), Some(&json!({ "raw": "Jean" })));
}

#[tokio::test]
async fn missing_prompts_follow_locale_fallback() {
    let registry = shop_registry().await;
    let conversation = Conversation::new();

    assert_eq!(
        registry
            .missing_prompts("Greetings", &conversation, "fr")
            .unwrap(),
        Some(vec!["Comment dois-je vous appeler ?".to_string()])
    );
    assert_eq!(
        registry
            .missing_prompts("Greetings", &conversation, "de")
            .unwrap(),
        Some(vec!["How should I call you?".to_string()])
    );
    assert!(registry
        .missing_prompts("Unknown", &conversation, "en")
        .is_err());
}

#[tokio::test]
async fn conversations_share_a_registry_independently() {
    let registry = shop_registry().await;
    let handler = Arc::new(ProcessTurnHandler::new(registry.clone()));
    let mut conversations: Vec<Conversation> = (0..8).map(|_| Conversation::new()).collect();

    let results = join_all(conversations.iter_mut().enumerate().map(|(i, conversation)| {
        let handler = handler.clone();
        async move {
            handler
                .handle(
                    turn("delivery", entity("datetime", &format!("day {i}"))),
                    conversation,
                )
                .await
        }
    }))
    .await;

    for (i, result) in results.into_iter().enumerate() {
        assert!(matches!(
            result.unwrap().outcome,
            TurnOutcome::AwaitingDependencies { .. }
        ));
        assert_eq!(
            conversations[i].memory.get("delivery-date"),
            Some(&json!({ "raw": format!("day {i}"), "value": "2026-10-20" }))
        );
    }

    registry.mark_done("Greetings", &mut conversations[0]).unwrap();
    assert!(registry.is_done("Greetings", &conversations[0]));
    assert!(conversations[1..]
        .iter()
        .all(|c| !registry.is_done("Greetings", c)));
}

// =============================================================================
// Properties
// =============================================================================

const SLOTS: [&str; 3] = ["s0", "s1", "s2"];
const PREREQUISITES: [&str; 3] = ["A0", "A1", "A2"];

fn property_registry() -> ActionRegistry {
    let target = ActionDefinition::new("Target", "target")
        .with_constraint(
            ConstraintGroup::default()
                .with_requirement(EntityRequirement::new("e0", SLOTS[0]))
                .with_requirement(EntityRequirement::new("e1", SLOTS[1])),
        )
        .with_constraint(
            ConstraintGroup::default().with_requirement(EntityRequirement::new("e2", SLOTS[2])),
        )
        .with_dependency(
            DependencyGroup::default()
                .with_action(PREREQUISITES[0])
                .with_action(PREREQUISITES[1]),
        )
        .with_dependency(DependencyGroup::default().with_action(PREREQUISITES[2]));

    let mut registry = ActionRegistry::new();
    registry
        .register_all(
            PREREQUISITES
                .iter()
                .map(|name| ActionDefinition::new(*name, name.to_lowercase()))
                .chain(std::iter::once(target)),
        )
        .unwrap();
    registry
}

fn conversation_with(registry: &ActionRegistry, filled: &[bool], done: &[bool]) -> Conversation {
    let mut conversation = Conversation::new();
    for (alias, _) in SLOTS.iter().zip(filled).filter(|(_, f)| **f) {
        conversation.memory.insert(*alias, json!({ "raw": "x" }));
    }
    for (name, _) in PREREQUISITES.iter().zip(done).filter(|(_, d)| **d) {
        registry.mark_done(*name, &mut conversation).unwrap();
    }
    conversation
}

proptest! {
    #[test]
    fn completion_is_conjunction_of_groups(
        filled in prop::collection::vec(any::<bool>(), 3),
        done in prop::collection::vec(any::<bool>(), 3),
    ) {
        let registry = property_registry();
        let conversation = conversation_with(&registry, &filled, &done);
        let target = registry.get("Target").unwrap();

        prop_assert_eq!(target.constraints_are_complete(&conversation.memory), filled.iter().all(|f| *f));
        prop_assert_eq!(target.dependencies_are_complete(&conversation), done.iter().all(|d| *d));
        prop_assert_eq!(
            target.is_complete(&conversation),
            target.constraints_are_complete(&conversation.memory)
                && target.dependencies_are_complete(&conversation)
        );
        prop_assert_eq!(
            target.first_unmet_group(&conversation).is_none(),
            target.is_complete(&conversation)
        );
    }

    #[test]
    fn mark_done_is_idempotent(
        done in prop::collection::vec(any::<bool>(), 3),
        repeat in 0usize..3,
    ) {
        let registry = property_registry();
        let mut conversation = conversation_with(&registry, &[], &done);
        let before = conversation.action_states.clone();

        let name = PREREQUISITES[repeat];
        registry.mark_done(name, &mut conversation).unwrap();
        let once = conversation.action_states.clone();
        registry.mark_done(name, &mut conversation).unwrap();

        prop_assert_eq!(&once, &conversation.action_states);
        prop_assert!(registry.is_done(name, &conversation));
        prop_assert_eq!(once.len(), before.len() + usize::from(!done[repeat]));
    }
}
