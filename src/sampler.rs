use rand::seq::SliceRandom;
use rand::Rng;

/// Distractors drawn per multiple-choice question
pub const DEFAULT_DISTRACTORS: usize = 3;

/// Build a shuffled option list for `target`.
///
/// Up to `count` distractors are drawn uniformly without replacement from
/// `pool`, skipping every item whose `key` equals the target's. The target's
/// rendered text is added and the whole list shuffled, so the result holds
/// `min(count, eligible pool) + 1` options with the correct one exactly once.
/// A small pool yields a short list; nothing is padded. Distinct items that
/// render to the same text are kept as they are.
pub fn build_options<T, K, R>(
    target: &T,
    pool: &[T],
    count: usize,
    key: impl Fn(&T) -> K,
    render: impl Fn(&T) -> String,
    rng: &mut R,
) -> Vec<String>
where
    K: PartialEq,
    R: Rng + ?Sized,
{
    let target_key = key(target);
    let candidates: Vec<&T> = pool
        .iter()
        .filter(|item| key(*item) != target_key)
        .collect();

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, count)
        .map(|item| render(*item))
        .collect();
    options.push(render(target));
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone)]
    struct Pair {
        key: &'static str,
        text: &'static str,
    }

    fn pool() -> Vec<Pair> {
        vec![
            Pair { key: "один", text: "bir" },
            Pair { key: "два", text: "ikki" },
            Pair { key: "три", text: "uch" },
            Pair { key: "четыре", text: "to'rt" },
            Pair { key: "пять", text: "besh" },
            Pair { key: "десять", text: "o'n" },
        ]
    }

    fn options_for(target: &Pair, pool: &[Pair], count: usize, seed: u64) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        build_options(target, pool, count, |p| p.key, |p| p.text.to_string(), &mut rng)
    }

    #[test]
    fn test_correct_answer_present_exactly_once() {
        let words = pool();
        for seed in 0..200 {
            let target = &words[(seed as usize) % words.len()];
            let options = options_for(target, &words, DEFAULT_DISTRACTORS, seed);
            assert_eq!(options.len(), DEFAULT_DISTRACTORS + 1);
            assert_eq!(options.iter().filter(|o| *o == target.text).count(), 1);
        }
    }

    #[test]
    fn test_no_pool_item_drawn_twice() {
        let words = pool();
        for seed in 0..200 {
            let options = options_for(&words[0], &words, 5, seed);
            assert_eq!(options.len(), 6);
            assert!(options.iter().all_unique());
        }
    }

    #[test]
    fn test_two_word_pool_gives_two_options() {
        let words = vec![
            Pair { key: "да", text: "ha" },
            Pair { key: "нет", text: "yo'q" },
        ];
        let options = options_for(&words[0], &words, 3, 7);
        assert_eq!(options.len(), 2);
        assert!(options.contains(&"ha".to_string()));
        assert!(options.contains(&"yo'q".to_string()));
    }

    #[test]
    fn test_target_alone_in_pool() {
        let words = vec![Pair { key: "да", text: "ha" }];
        assert_eq!(options_for(&words[0], &words, 3, 1), vec!["ha".to_string()]);
        assert_eq!(options_for(&words[0], &[], 3, 1), vec!["ha".to_string()]);
    }

    #[test]
    fn test_homographs_are_not_deduplicated() {
        let words = vec![
            Pair { key: "брат", text: "aka" },
            Pair { key: "старший брат", text: "aka" },
        ];
        let options = options_for(&words[0], &words, 3, 3);
        assert_eq!(options, vec!["aka".to_string(), "aka".to_string()]);
    }

    #[test]
    fn test_same_seed_same_options() {
        let words = pool();
        assert_eq!(
            options_for(&words[2], &words, 3, 42),
            options_for(&words[2], &words, 3, 42)
        );
    }

    #[test]
    fn test_correct_position_is_roughly_uniform() {
        let words = pool();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut positions = [0usize; 4];
        for _ in 0..4000 {
            let options = build_options(
                &words[1],
                &words,
                3,
                |p| p.key,
                |p| p.text.to_string(),
                &mut rng,
            );
            let pos = options.iter().position(|o| o == "ikki").unwrap();
            positions[pos] += 1;
        }
        for count in positions {
            assert!((800..1200).contains(&count), "skewed positions: {positions:?}");
        }
    }
}
