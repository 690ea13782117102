use crate::lexicon::Lexicon;
use crate::rules::{Category, Color, Direction, Highlight, Repeat, Rule, Size, WordClassifier};

fn classifier() -> WordClassifier<'static> {
    WordClassifier::new(Lexicon::shared())
}

#[test]
fn classify_reverse() {
    let c = classifier().classify("reverse", false);
    assert_eq!(c.rules.get(Category::Direction), Some(&Rule::Direction(Direction::Reverse)));
    assert_eq!(c.rules.repeat(), Repeat::One);
    assert!(c.conflicts.is_empty());
    assert_eq!(c.branches(), vec![c.rules.clone()]);
}

#[test]
fn classify_examples_matching() {
    // (word, plural, expected rule, expected repeat)
    let cases: Vec<(&str, bool, Option<Rule>, Repeat)> = vec![
        ("red", false, Some(Rule::Color(Color::Red)), Repeat::One),
        ("red", true, Some(Rule::Color(Color::Red)), Repeat::Two),
        ("Crimson", false, Some(Rule::Color(Color::Red)), Repeat::One),
        ("crossed", false, Some(Rule::Cross), Repeat::One),
        ("down", false, Some(Rule::Direction(Direction::Down)), Repeat::One),
        ("tiny", false, Some(Rule::Size(Size::Small)), Repeat::One),
        ("first", false, Some(Rule::Highlight(Highlight::Before)), Repeat::One),
        ("middle", false, Some(Rule::Highlight(Highlight::Middle)), Repeat::One),
        ("ends", true, Some(Rule::Highlight(Highlight::After)), Repeat::Two),
        ("two", false, None, Repeat::Two),
        ("four", true, None, Repeat::Four),
        ("double", true, None, Repeat::Two),
        ("coat", false, None, Repeat::One),
        ("coats", true, None, Repeat::Two),
    ];

    for (word, plural, rule, repeat) in cases {
        let c = classifier().classify(word, plural);
        if let Some(rule) = &rule {
            assert_eq!(c.rules.get(rule.category()), Some(rule), "rule for '{word}' (rules: {:?})", c.rules);
        }
        assert_eq!(c.rules.repeat(), repeat, "repeat for '{word}' plural={plural}");
    }
}

#[test]
fn conflicts_need_two_exclusive_matches() {
    // (word, expected conflicts)
    let cases: Vec<(&str, Vec<Category>)> = vec![
        ("reverse", vec![]),
        ("red", vec![]),
        ("tiny", vec![]),
        ("fore", vec![]),
        ("coat", vec![]),
        ("high", vec![Category::Direction, Category::Size]),
        ("back", vec![Category::Direction, Category::Highlight]),
    ];

    for (word, conflicts) in cases {
        assert_eq!(classifier().classify(word, false).conflicts, conflicts, "conflicts for '{word}'");
    }
}

#[test]
fn plain_word_triggers_nothing() {
    let c = classifier().classify("coat", false);
    assert!(!c.has_rule());
    assert_eq!(c.rules.len(), 1);
    assert!(c.conflicts.is_empty());
}

#[test]
fn number_sounds_attach_sound_and_repeat() {
    let c = classifier().classify("to", false);
    assert_eq!(c.rules.repeat(), Repeat::Two);
    assert_eq!(c.rules.get(Category::Sound), Some(&Rule::Sound { from: "to".into(), to: "2".into() }));

    let c = classifier().classify("for", false);
    assert_eq!(c.rules.repeat(), Repeat::Four);
    assert_eq!(c.rules.get(Category::Sound), Some(&Rule::Sound { from: "for".into(), to: "4".into() }));
}

#[test]
fn sound_override_is_stable_across_plurality() {
    for word in ["to", "too", "for", "fore"] {
        let singular = classifier().classify(word, false).rules.repeat();
        let plural = classifier().classify(word, true).rules.repeat();
        assert_eq!(singular, plural, "override for '{word}' must ignore the plural flag");
    }
}

#[test]
fn plurality_monotonicity() {
    for word in ["coat", "red", "reverse", "tiny", "hat", "cross", "middle"] {
        assert_eq!(classifier().classify(word, false).rules.repeat(), Repeat::One, "'{word}' singular");
        let plural = classifier().classify(word, true).rules.repeat();
        assert!(matches!(plural, Repeat::Two | Repeat::Four), "'{word}' plural gave {plural:?}");
    }
}

#[test]
fn conflicting_categories_branch() {
    let c = classifier().classify("high", false);
    assert_eq!(c.conflicts, vec![Category::Direction, Category::Size]);

    let branches = c.branches();
    assert_eq!(branches.len(), c.conflicts.len());
    assert!(branches[0].contains(Category::Direction) && !branches[0].contains(Category::Size));
    assert!(branches[1].contains(Category::Size) && !branches[1].contains(Category::Direction));
}

#[test]
fn fore_keeps_highlight_and_sound_together() {
    // Sound is not an exclusive category, so it rides along without branching.
    let c = classifier().classify("fore", false);
    assert!(c.conflicts.is_empty());
    assert_eq!(c.rules.get(Category::Highlight), Some(&Rule::Highlight(Highlight::Before)));
    assert!(c.rules.contains(Category::Sound));
    assert_eq!(c.rules.repeat(), Repeat::Four);
}

#[test]
fn classification_is_deterministic() {
    for word in ["back", "high", "red", "to", "coats", "forget"] {
        assert_eq!(classifier().classify(word, true), classifier().classify(word, true));
    }
}
