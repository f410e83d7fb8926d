//! Azar and Sorte resolution through the public API.

use bioma::cards::{AzarCard, Biome, Card, SorteCard};
use bioma::core::{CardId, GameRng, MatchState, Player, PlayerId, PlayerMap};
use bioma::effects::{EffectEvent, EffectResolver, PlusTwoChoice, StealPick};
use bioma::error::RuleError;
use bioma::zones::Pile;

const ANA: PlayerId = PlayerId::new(0);
const BETO: PlayerId = PlayerId::new(1);
const CAIO: PlayerId = PlayerId::new(2);

/// Ana (Cerrado), Beto (Pampa), Caio (Pantanal); `deck` top is its last card.
fn table(deck: Vec<Card>) -> MatchState {
    let players = PlayerMap::from_vec(vec![
        Player::new(ANA, "Ana", Biome::Cerrado, true),
        Player::new(BETO, "Beto", Biome::Pampa, false),
        Player::new(CAIO, "Caio", Biome::Pantanal, false),
    ]);
    MatchState::from_parts(
        players,
        Pile::from_cards(deck),
        Pile::new(),
        vec![Biome::Cerrado, Biome::Pampa, Biome::Pantanal],
        8,
        GameRng::new(17),
    )
}

fn animal(id: u32, biome: Biome) -> Card {
    Card::animal(CardId(id), format!("Animal {id}"), biome)
}

fn fauna_deck(n: u32) -> Vec<Card> {
    (500..500 + n).map(|i| Card::fauna(CardId(i))).collect()
}

/// Sorte Piedade pulls the first matching animal from every opponent.
#[test]
fn test_sorte_piedade_collects() {
    let mut state = table(fauna_deck(3));
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::Piedade));
    state.players[BETO].hand.push_top(animal(10, Biome::Pampa));
    state.players[BETO].hand.push_top(animal(11, Biome::Cerrado));
    state.players[BETO].hand.push_top(animal(12, Biome::Cerrado));
    state.players[CAIO].hand.push_top(animal(20, Biome::Pantanal));

    let report = EffectResolver::play_sorte(&mut state, ANA, CardId(1), None, None).unwrap();

    assert_eq!(report.events.len(), 1);
    assert!(state.players[ANA].hand.contains(CardId(11)));
    assert!(state.players[BETO].hand.contains(CardId(12)));
    assert_eq!(state.players[CAIO].hand.len(), 1);
    assert_eq!(
        state.players[ANA].active_card.as_ref().map(|c| c.id),
        Some(CardId(1))
    );
    assert!(state.integrity_check().is_ok());
}

/// Sorte Devolve sends one own-biome animal per opponent back to the deck.
#[test]
fn test_sorte_devolve_returns_to_deck() {
    let mut state = table(fauna_deck(3));
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::Devolve));
    state.players[BETO].hand.push_top(animal(10, Biome::Pampa));
    state.players[CAIO].hand.push_top(animal(20, Biome::Cerrado));

    let report = EffectResolver::play_sorte(&mut state, ANA, CardId(1), None, None).unwrap();

    assert_eq!(
        report.events.to_vec(),
        vec![EffectEvent::ReturnedToDeck {
            card: CardId(10),
            player: BETO
        }]
    );
    assert!(state.deck.contains(CardId(10)));
    assert_eq!(state.deck.len(), 4);
    assert!(state.players[CAIO].hand.contains(CardId(20)));
}

/// Pulo+1 against a seat holding the actor's biome resolves at once.
#[test]
fn test_pulo_mais_um_immediate() {
    let mut state = table(fauna_deck(1));
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::PuloMaisUm));
    state.players[BETO].hand.push_top(animal(10, Biome::Cerrado));

    EffectResolver::play_sorte(&mut state, ANA, CardId(1), Some(BETO), None).unwrap();

    assert!(state.players[ANA].hand.contains(CardId(10)));
    assert!(state.players[BETO].effects.skip_turn);
    assert!(state.players[BETO].effects.pulo_mais_um.is_none());
    assert!(state.discard_pile.contains(CardId(1)));
    assert!(state.players[BETO].active_card.is_none());
}

/// Pulo+1 without a target, at oneself, or at a latched seat changes nothing.
#[test]
fn test_pulo_mais_um_refusals() {
    let mut state = table(fauna_deck(1));
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::PuloMaisUm));

    assert_eq!(
        EffectResolver::play_sorte(&mut state, ANA, CardId(1), None, None).err(),
        Some(RuleError::MissingTarget)
    );
    assert_eq!(
        EffectResolver::play_sorte(&mut state, ANA, CardId(1), Some(ANA), None).err(),
        Some(RuleError::SelfTarget)
    );

    EffectResolver::play_sorte(&mut state, ANA, CardId(1), Some(BETO), None).unwrap();
    assert!(state.players[BETO].effects.pulo_mais_um.is_some());

    state.players[CAIO].hand.push_top(Card::sorte(CardId(2), SorteCard::PuloMaisUm));
    assert_eq!(
        EffectResolver::play_sorte(&mut state, CAIO, CardId(2), Some(BETO), None).err(),
        Some(RuleError::ObligationPending(BETO))
    );
    assert_eq!(state.players[CAIO].hand.len(), 1);
}

/// A +2 whose second steal finds the source down to one card skips it.
#[test]
fn test_plus_two_second_steal_skipped() {
    let mut state = table(fauna_deck(2));
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::MaisDois));
    state.players[BETO].hand.push_top(Card::fauna(CardId(10)));
    state.players[BETO].hand.push_top(Card::fauna(CardId(11)));

    let choice = PlusTwoChoice::StealTwo {
        first: StealPick::random(BETO),
        second: Some(StealPick::random(BETO)),
    };
    let report =
        EffectResolver::play_sorte(&mut state, ANA, CardId(1), None, Some(&choice)).unwrap();

    assert_eq!(state.players[BETO].hand.len(), 1);
    assert_eq!(state.players[ANA].hand.len(), 1);
    assert_eq!(report.lines.len(), 2);
    assert_eq!(report.lines[1], "could not steal from Beto");
}

/// Draws inside a +2 stop at an empty deck.
#[test]
fn test_plus_two_draws_until_empty() {
    let mut state = table(fauna_deck(1));
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::MaisDois));

    let report = EffectResolver::play_sorte(
        &mut state,
        ANA,
        CardId(1),
        None,
        Some(&PlusTwoChoice::DrawTwo),
    )
    .unwrap();

    assert!(state.deck.is_empty());
    assert_eq!(state.players[ANA].hand.len(), 1);
    assert_eq!(report.lines, vec!["drew 1 card", "the deck is empty"]);
}

/// An Azar drawn during a +2 resolves and reports nested.
#[test]
fn test_plus_two_nested_azar() {
    let mut state = table(vec![
        Card::fauna(CardId(30)),
        Card::azar(CardId(31), AzarCard::Pulo),
    ]);
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::MaisDois));

    let report = EffectResolver::play_sorte(
        &mut state,
        ANA,
        CardId(1),
        None,
        Some(&PlusTwoChoice::DrawTwo),
    )
    .unwrap();

    assert_eq!(report.nested.len(), 1);
    assert!(state.players[ANA].effects.skip_turn);
    assert!(state.discard_pile.contains(CardId(31)));
    assert!(state.players[ANA].hand.contains(CardId(30)));
    assert!(report
        .all_lines()
        .iter()
        .any(|line| line.starts_with("Pulo (Azar): ")));
}

/// A held card blocks another Piedade, Devolve or +2.
#[test]
fn test_active_slot_blocks_sorte() {
    let mut state = table(fauna_deck(1));
    state.players[ANA].active_card = Some(Card::sorte(CardId(9), SorteCard::Devolve));
    state.players[ANA].hand.push_top(Card::sorte(CardId(1), SorteCard::Piedade));

    assert_eq!(
        EffectResolver::play_sorte(&mut state, ANA, CardId(1), None, None).err(),
        Some(RuleError::ActiveCardInPlay(ANA))
    );
    assert!(state.players[ANA].hand.contains(CardId(1)));
}

/// Azar Devolve without an own-biome animal latches until one arrives.
#[test]
fn test_azar_devolve_latch_resolves_on_draw() {
    let mut state = table(vec![animal(40, Biome::Cerrado), animal(41, Biome::Pampa)]);
    state.players[ANA].hand.push_top(Card::azar(CardId(1), AzarCard::Devolve));

    let report = EffectResolver::apply_azar(&mut state, ANA, CardId(1)).unwrap();
    assert!(report
        .events
        .contains(&EffectEvent::DevolveLatched { player: ANA }));
    assert!(state.players[ANA].effects.devolve_pending);

    let off_biome = state.draw_card(ANA).unwrap();
    assert!(!off_biome.devolved);
    assert!(state.players[ANA].effects.devolve_pending);

    let deck_before = state.deck.len();
    let own = state.draw_card(ANA).unwrap();
    assert!(own.devolved);
    assert_eq!(own.card.id, CardId(40));
    assert!(!state.players[ANA].effects.devolve_pending);
    assert!(!state.players[ANA].hand.contains(CardId(40)));
    assert_eq!(state.deck.len(), deck_before);
}

/// A pending Devolve also consumes an own-biome animal that arrives by steal,
/// and the deck is reshuffled with it.
#[test]
fn test_azar_devolve_latch_resolves_on_steal() {
    let mut state = table(fauna_deck(20));
    assert!(state.players[ANA].effects.latch_devolve());
    state.players[BETO].hand.push_top(Card::fauna(CardId(10)));
    state.players[BETO].hand.push_top(animal(40, Biome::Cerrado));
    let mut unshuffled = state.deck.ids();
    unshuffled.push(CardId(40));

    let stolen = state.steal_specific_card(BETO, ANA, 1).unwrap();

    assert_eq!(stolen.card.id, CardId(40));
    assert_eq!(stolen.from, Some(BETO));
    assert!(stolen.devolved);
    assert!(!stolen.is_azar());
    assert!(!state.players[ANA].effects.devolve_pending);
    assert!(!state.players[ANA].hand.contains(CardId(40)));
    assert!(state.deck.contains(CardId(40)));
    assert_eq!(state.deck.len(), 21);
    assert_ne!(state.deck.ids(), unshuffled);
    assert!(state.integrity_check().is_ok());
}

/// Azar Devolve with an own-biome animal in hand resolves at once.
#[test]
fn test_azar_devolve_immediate() {
    let mut state = table(fauna_deck(2));
    state.players[ANA].hand.push_top(animal(7, Biome::Cerrado));
    state.players[ANA].hand.push_top(Card::azar(CardId(1), AzarCard::Devolve));

    EffectResolver::apply_azar(&mut state, ANA, CardId(1)).unwrap();

    assert!(!state.players[ANA].effects.devolve_pending);
    assert!(state.deck.contains(CardId(7)));
    assert!(state.players[ANA].hand.is_empty());
}

/// Azar Piedade hands each opponent one card of their biome.
#[test]
fn test_azar_piedade_gives() {
    let mut state = table(fauna_deck(1));
    state.players[ANA].hand.push_top(animal(10, Biome::Pampa));
    state.players[ANA].hand.push_top(animal(11, Biome::Pampa));
    state.players[ANA].hand.push_top(animal(12, Biome::Pantanal));
    state.players[ANA].hand.push_top(Card::azar(CardId(1), AzarCard::Piedade));

    let report = EffectResolver::apply_azar(&mut state, ANA, CardId(1)).unwrap();

    assert_eq!(state.players[BETO].hand.ids(), vec![CardId(10)]);
    assert_eq!(state.players[CAIO].hand.ids(), vec![CardId(12)]);
    assert_eq!(state.players[ANA].hand.ids(), vec![CardId(11)]);
    assert_eq!(report.lines.len(), 2);
}

/// Stealing from a one-card hand fails and changes nothing.
#[test]
fn test_steal_precondition() {
    let mut state = table(fauna_deck(1));
    state.players[BETO].hand.push_top(Card::fauna(CardId(10)));
    let before = state.players.clone();

    assert_eq!(
        state.steal_card(BETO, ANA).err(),
        Some(RuleError::StealSourceTooSmall(BETO))
    );
    assert!(state.steal_specific_card(BETO, ANA, 0).is_err());
    assert_eq!(state.players, before);
}
