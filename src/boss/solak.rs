//! Solak, Guardian of the Grove
//!
//! Encounter configuration: lifecycle lines in the four supported game
//! locales, the mechanic order with phase ranks, and the two strategy
//! settings that shift timer durations.

use hashbrown::HashMap;

use crate::boss::{
    BossConfig, CustomSetting, LifecycleMatchers, MechanicCategory, MechanicDefinition,
    SettingKind, SettingOption,
};
use crate::matching::{FuzzyMatcher, PatternError};
use crate::settings::NotificationConfig;
use crate::timers::{ColorPhase, DurationRule, StatusEventRule, TickRule, TimerTemplate};

// Phase ranks. Lifecycle sentinels (ready/lobby/start/dead) live in `Phase`;
// mechanics occupy 2..=7.
const ARMS: u8 = 2;
const ERUPTIONS: u8 = 3;
const P3: u8 = 4;
const PAD_1_OPEN: u8 = 5;
const PAD_1_CLOSE: u8 = 6;
const P4: u8 = 7;

fn blue_to_green() -> Vec<ColorPhase> {
    vec![
        ColorPhase { remaining: 999, color: "#29d8e6".into() },
        ColorPhase { remaining: 1, color: "#4ade80".into() },
    ]
}

fn orange_to_red() -> Vec<ColorPhase> {
    vec![
        ColorPhase { remaining: 999, color: "#fbbf24".into() },
        ColorPhase { remaining: 1, color: "#ef4444".into() },
    ]
}

/// Build the Solak configuration. Fails only if a phrase set no longer
/// compiles, which is a programming error caught at load time.
pub fn config() -> Result<BossConfig, PatternError> {
    let lifecycle = LifecycleMatchers {
        join: FuzzyMatcher::compile(&[
            "Welcome to your session against: Solak, Guardian of the Grove.",
            "Willkommen zu deiner Runde gegen: Solak, der Wächter des Hains",
            "Bienvenue dans votre session de combat contre : Solak, le Gardien du bois.",
            "Bem-vind",
        ])?,
        start: FuzzyMatcher::compile(&[
            "Merethiel! The betrayer! You'd lead these mortals against me?",
            "Merethiel, die Verräterin! Du sendest diese Sterblichen gegen mich in den Kampf?",
            "Merethiel ! Traîtresse ! Tu dirigerais donc ces mortels contre moi ?",
            "Merethiel! A traidora! Como ousa auxiliar esses mortais em uma luta contra mim?",
        ])?,
        end: FuzzyMatcher::compile(&[
            "Merethiel: I'm sorry you failed us Erethdor. You are no brother of mine.",
            "Merethiel: Es schmerzt mich, dass du uns im Stich",
            "Merethiel : Je suis navrée que tu nous aies trahis, Erethdor. Tu n'es plus mon frère.",
            "Merethiel: Lamento que você tenha falhado, Erethdor. Você não merece ser chamado de meu irmão.",
        ])?,
    };

    let mechanics = vec![
        MechanicDefinition {
            id: "arms".into(),
            category: MechanicCategory::Tag,
            phase: ARMS,
            matcher: FuzzyMatcher::compile(&[
                "I will replenish the earth with your bones.",
                "Ich werde die Erde mit euren Knochen nähren!",
                "Je vais alimenter la terre",
                "Alimentarei a terra com os seus ossos.",
            ])?,
            default_notification: NotificationConfig { visual: true, audio: true, duration: 10 },
            timers: vec![TimerTemplate {
                id: "arms_timer".into(),
                label: "Arms".into(),
                color_phases: blue_to_green(),
                duration: DurationRule::BySetting {
                    key: "p1_strategy".into(),
                    cases: vec![("bomb".into(), 98)],
                    default: 23,
                },
                status_events: vec![
                    StatusEventRule { tick: TickRule::Fixed(0), text: "Phase 1".into() },
                    StatusEventRule { tick: TickRule::AtExpiry, text: "Arms/Legs/Core".into() },
                ],
            }],
        },
        MechanicDefinition {
            id: "eruptions".into(),
            category: MechanicCategory::Tag,
            phase: ERUPTIONS,
            matcher: FuzzyMatcher::compile(&[
                "How futile. You are weak, disgusting creatures!",
                "Vergeblich. Ihr seid schwache, widerwärtige Kreaturen!",
                "Quelle action futile. Vous n'êtes que des créatures faibles et répugnantes !",
                "Que fútil! Vocês não passam de criaturas fracas e repugnantes!",
            ])?,
            default_notification: NotificationConfig { visual: true, audio: true, duration: 10 },
            timers: vec![TimerTemplate {
                id: "eruptions_timer".into(),
                label: "Eruptions".into(),
                color_phases: blue_to_green(),
                duration: DurationRule::Fixed(10),
                status_events: vec![StatusEventRule {
                    tick: TickRule::AtExpiry,
                    text: "Phase 2".into(),
                }],
            }],
        },
        MechanicDefinition {
            id: "p3".into(),
            category: MechanicCategory::Tag,
            phase: P3,
            matcher: FuzzyMatcher::compile(&[
                "Merethiel: Erethdor is getting weaker and losing control.",
                "Merethiel: Erethdor wird schwächer und verliert an Kontrolle.",
                "Merethiel : Erethdor s'affaiblit et commence",
                "Merethiel: Erethdor está ficando mais fraco e",
            ])?,
            default_notification: NotificationConfig { visual: true, audio: true, duration: 10 },
            timers: vec![TimerTemplate {
                id: "p3_timer".into(),
                label: "Phase 3".into(),
                color_phases: blue_to_green(),
                duration: DurationRule::Fixed(10),
                status_events: vec![StatusEventRule {
                    tick: TickRule::AtExpiry,
                    text: "Phase 3".into(),
                }],
            }],
        },
        // The pad announcement drives two mechanics at consecutive ranks:
        // the open window and the close countdown both key off the same line.
        MechanicDefinition {
            id: "pads".into(),
            category: MechanicCategory::Mechanic,
            phase: PAD_1_OPEN,
            matcher: FuzzyMatcher::compile(&[
                "You will not free him, THIS POWER IS MINE.",
                "Er Kann nicht befreit werden. DIESE MACHT IST MIR UNTERTAN!",
                "Vous ne le libérerez pas ! CE POUVOIR EST M'APPARTIENT !",
                "Você não o libertará, SEU PODER PERTENCE A MIM.",
            ])?,
            default_notification: NotificationConfig { visual: true, audio: true, duration: 10 },
            timers: vec![TimerTemplate {
                id: "pad_open".into(),
                label: "Pad Open".into(),
                color_phases: blue_to_green(),
                duration: DurationRule::Fixed(33),
                status_events: vec![StatusEventRule {
                    tick: TickRule::AtExpiry,
                    text: "Phase 3".into(),
                }],
            }],
        },
        MechanicDefinition {
            id: "pad_close".into(),
            category: MechanicCategory::Mechanic,
            phase: PAD_1_CLOSE,
            matcher: FuzzyMatcher::compile(&[
                "You will not free him, THIS POWER IS MINE.",
                "Er Kann nicht befreit werden. DIESE MACHT IST MIR UNTERTAN!",
                "Vous ne le libérerez pas ! CE POUVOIR EST M'APPARTIENT !",
                "Você não o libertará, SEU PODER PERTENCE A MIM.",
            ])?,
            default_notification: NotificationConfig { visual: true, audio: true, duration: 10 },
            timers: vec![TimerTemplate {
                id: "pad_close_timer".into(),
                label: "Pad Close".into(),
                color_phases: orange_to_red(),
                duration: DurationRule::Fixed(52),
                status_events: vec![StatusEventRule {
                    tick: TickRule::AtExpiry,
                    text: "Phase 3".into(),
                }],
            }],
        },
        MechanicDefinition {
            id: "p4".into(),
            category: MechanicCategory::Tag,
            phase: P4,
            matcher: FuzzyMatcher::compile(&[
                "Merethiel: No... Solak is close to dying, if Solak dies all is lost.",
                "Merethiel: Nein... Solak steht kurz vor dem Tode. Wenn er stirbt, ist alles verloren.",
                "Non... Solak est",
                "Merethiel: Não... Solak está prestes a morrer. Se Solak morre, tudo está perdido.",
            ])?,
            default_notification: NotificationConfig { visual: true, audio: true, duration: 10 },
            timers: vec![TimerTemplate {
                id: "p4_timer".into(),
                label: "Phase 4".into(),
                color_phases: blue_to_green(),
                duration: DurationRule::BaseMinusSetting { key: "p4_hit_timing".into(), base: 28 },
                status_events: vec![
                    StatusEventRule { tick: TickRule::Fixed(0), text: "Phase 4".into() },
                    StatusEventRule { tick: TickRule::AtExpiry, text: "Phase 4".into() },
                ],
            }],
        },
    ];

    let custom_settings = vec![
        CustomSetting {
            key: "p1_strategy".into(),
            kind: SettingKind::Select,
            label: "Phase 1 Skip".into(),
            default: "rootling".into(),
            options: vec![
                SettingOption { label: "Rootling (21.6s)".into(), value: "rootling".into() },
                SettingOption { label: "Bomb (1:06)".into(), value: "bomb".into() },
            ],
            min: None,
            max: None,
            description: Some("Changes when the Arms timer will display".into()),
            info: Some("Select 'Bomb' if your team cannot skip the roots mechanic.".into()),
        },
        CustomSetting {
            key: "p4_hit_timing".into(),
            kind: SettingKind::Select,
            label: "Phase 4 Hit Timing".into(),
            default: 2.into(),
            options: (1..=4)
                .map(|n| SettingOption { label: n.to_string(), value: n.into() })
                .collect(),
            min: None,
            max: None,
            description: Some("Adjust based on your first ability of choice.".into()),
            info: Some(
                "Calculates the exact tick the boss becomes vulnerable based on animation delay."
                    .into(),
            ),
        },
    ];

    let default_specific: HashMap<_, _> = custom_settings
        .iter()
        .map(|setting| (setting.key.clone(), setting.default.clone()))
        .collect();

    Ok(BossConfig {
        id: "solak".into(),
        name: "Solak".into(),
        lifecycle,
        mechanics,
        custom_settings,
        default_specific,
    })
}
