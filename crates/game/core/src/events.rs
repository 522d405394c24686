//! Random exploration events.
//!
//! Traps, rests and treasure resolve directly against the character through
//! [`GameEvent::apply_passive`]. Combat and merchant events only describe the
//! encounter; the caller runs the fight or the purchase.

use crate::env::{ItemDefinition, RandomSource, Tables};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterSheet, InventoryError};
use crate::stats::Combatant;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EventKind {
    Combat,
    Treasure,
    Trap,
    Merchant,
    Rest,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Combat,
        EventKind::Treasure,
        EventKind::Trap,
        EventKind::Merchant,
        EventKind::Rest,
    ];
}

const ENEMY_NAMES: [&str; 5] = ["Bandit", "Goblin", "Skeleton", "Wolf", "Troll"];
const TRAP_NAMES: [&str; 5] = ["pit", "darts", "poison gas", "explosion", "net"];
const MERCHANT_STOCK: usize = 3;

/// Item a merchant sells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerchantOffer {
    pub item: ItemDefinition,
    pub price: u32,
}

impl MerchantOffer {
    /// Pay for the item and put it in the bag. Nothing changes on failure.
    pub fn buy(&self, sheet: &mut CharacterSheet) -> Result<(), EventError> {
        if sheet.gold < self.price {
            return Err(EventError::NotEnoughGold {
                price: self.price,
                gold: sheet.gold,
            });
        }
        sheet.inventory.add(self.item.clone(), 1)?;
        sheet.gold -= self.price;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    Combat {
        monster: Combatant,
    },
    Treasure {
        gold: u32,
        item: ItemDefinition,
    },
    Trap {
        name: String,
        damage: u32,
        escape_difficulty: u32,
    },
    Merchant {
        offers: Vec<MerchantOffer>,
    },
    Rest {
        health_recovery: u32,
    },
}

/// Changes [`GameEvent::apply_passive`] made to a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventEffect {
    pub health_lost: u32,
    pub health_restored: u32,
    pub gold_gained: u32,
    pub item: Option<ItemDefinition>,
    pub item_stored: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("cannot afford {price} gold with {gold}")]
    NotEnoughGold { price: u32, gold: u32 },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for EventError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughGold { .. } => ErrorSeverity::Recoverable,
            Self::Inventory(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughGold { .. } => "EVENT_NOT_ENOUGH_GOLD",
            Self::Inventory(err) => err.error_code(),
        }
    }
}

/// Roll an event of `kind` (or a random kind) scaled to `difficulty`.
pub fn generate_event(
    kind: Option<EventKind>,
    difficulty: u32,
    tables: &Tables,
    rng: &mut impl RandomSource,
) -> GameEvent {
    let difficulty = difficulty.max(1);
    let scaled = |factor: u32, extra: u32| difficulty.saturating_mul(factor).saturating_add(extra);
    let kind = match kind {
        Some(kind) => kind,
        None => *rng.pick(&EventKind::ALL).unwrap_or(&EventKind::Rest),
    };

    match kind {
        EventKind::Combat => {
            let name = rng.pick(&ENEMY_NAMES).copied().unwrap_or("Bandit");
            let health = scaled(10, 20 + rng.range(0, 15)).saturating_sub(5).max(1);
            let attack = scaled(2, 5 + rng.range(0, 6)).saturating_sub(2);
            GameEvent::Combat {
                monster: Combatant::new(format!("{name} (level {difficulty})"), health, attack, 0),
            }
        }
        EventKind::Treasure => {
            let item = tables.rewards.generate(difficulty, None, rng);
            GameEvent::Treasure {
                gold: scaled(10, rng.range(1, 20)),
                item,
            }
        }
        EventKind::Trap => GameEvent::Trap {
            name: rng.pick(&TRAP_NAMES).copied().unwrap_or("pit").to_owned(),
            damage: scaled(3, 5 + rng.range(0, 5)),
            escape_difficulty: scaled(2, 5),
        },
        EventKind::Merchant => {
            let offers = (0..MERCHANT_STOCK)
                .map(|_| {
                    let item = tables.rewards.generate(difficulty, None, rng);
                    MerchantOffer {
                        item,
                        price: scaled(20, rng.range(5, 20)),
                    }
                })
                .collect();
            GameEvent::Merchant { offers }
        }
        EventKind::Rest => GameEvent::Rest {
            health_recovery: scaled(2, 10),
        },
    }
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Combat { .. } => EventKind::Combat,
            Self::Treasure { .. } => EventKind::Treasure,
            Self::Trap { .. } => EventKind::Trap,
            Self::Merchant { .. } => EventKind::Merchant,
            Self::Rest { .. } => EventKind::Rest,
        }
    }

    /// Apply trap, rest and treasure effects. Traps never drop the character
    /// below 1 health. Combat and merchant events change nothing.
    pub fn apply_passive(&self, sheet: &mut CharacterSheet) -> EventEffect {
        let mut effect = EventEffect::default();
        match self {
            Self::Trap { damage, name, .. } => {
                let floor = sheet.health.min(1);
                let after = sheet.health.saturating_sub(*damage).max(floor);
                effect.health_lost = sheet.health - after;
                sheet.health = after;
                tracing::debug!("{} triggers a {name} trap (-{})", sheet.name, effect.health_lost);
            }
            Self::Rest { health_recovery } => {
                effect.health_restored = sheet.heal(*health_recovery);
            }
            Self::Treasure { gold, item } => {
                sheet.gold = sheet.gold.saturating_add(*gold);
                effect.gold_gained = *gold;
                effect.item_stored = match sheet.inventory.add(item.clone(), 1) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!("{} left {} in the chest: {err}", sheet.name, item.name);
                        false
                    }
                };
                effect.item = Some(item.clone());
            }
            Self::Combat { .. } | Self::Merchant { .. } => {}
        }
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ArchetypeTable, Class, Race, SeededRng};
    use crate::state::{CharacterId, Inventory};

    fn sheet() -> CharacterSheet {
        CharacterSheet::create(
            CharacterId(5),
            "Nim",
            Race::Orc,
            Class::Rogue,
            &ArchetypeTable::standard(),
        )
        .unwrap()
    }

    #[test]
    fn requested_kind_is_honoured() {
        let tables = Tables::standard();
        let mut rng = SeededRng::new(11);
        for kind in EventKind::ALL {
            assert_eq!(generate_event(Some(kind), 3, &tables, &mut rng).kind(), kind);
        }
    }

    #[test]
    fn event_stats_scale_with_difficulty() {
        let tables = Tables::standard();
        let mut rng = SeededRng::new(12);
        for _ in 0..50 {
            match generate_event(Some(EventKind::Combat), 4, &tables, &mut rng) {
                GameEvent::Combat { monster } => {
                    assert!((55..=70).contains(&monster.health), "{}", monster.health);
                    assert!((11..=17).contains(&monster.attack), "{}", monster.attack);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[test]
    fn huge_difficulty_saturates() {
        let tables = Tables::standard();
        let mut rng = SeededRng::new(4);
        for kind in EventKind::ALL {
            let event = generate_event(Some(kind), u32::MAX, &tables, &mut rng);
            assert_eq!(event.kind(), kind);
        }

        match generate_event(Some(EventKind::Trap), u32::MAX, &tables, &mut rng) {
            GameEvent::Trap {
                damage,
                escape_difficulty,
                ..
            } => assert_eq!((damage, escape_difficulty), (u32::MAX, u32::MAX)),
            other => panic!("expected a trap, got {other:?}"),
        }
    }

    #[test]
    fn trap_never_kills() {
        let mut hero = sheet();
        hero.health = 3;
        let trap = GameEvent::Trap {
            name: "pit".into(),
            damage: 50,
            escape_difficulty: 7,
        };
        let effect = trap.apply_passive(&mut hero);
        assert_eq!(hero.health, 1);
        assert_eq!(effect.health_lost, 2);
    }

    #[test]
    fn rest_heals_and_treasure_pays() {
        let mut hero = sheet().with_inventory(Inventory::new(1));
        hero.health = hero.max_health - 5;
        GameEvent::Rest { health_recovery: 12 }.apply_passive(&mut hero);
        assert_eq!(hero.health, hero.max_health);

        let treasure = GameEvent::Treasure {
            gold: 40,
            item: ItemDefinition::life_potion(),
        };
        let effect = treasure.apply_passive(&mut hero);
        assert_eq!(hero.gold, 40);
        assert!(effect.item_stored);
    }

    #[test]
    fn merchant_purchase_checks_gold() {
        let mut hero = sheet();
        let offer = MerchantOffer {
            item: ItemDefinition::life_potion(),
            price: 30,
        };
        assert_eq!(
            offer.buy(&mut hero),
            Err(EventError::NotEnoughGold { price: 30, gold: 0 })
        );
        hero.gold = 45;
        offer.buy(&mut hero).unwrap();
        assert_eq!(hero.gold, 15);
        assert_eq!(hero.inventory.count("Life Potion"), 1);
    }
}
