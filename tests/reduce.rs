use stoat_sat::{config::Config, context::Context, db::ClauseRef};

/// Ten learned clauses, each outside the keep bounds, and so extended with analyzed stamps.
fn ten_extended(ctx: &mut Context) -> Vec<ClauseRef> {
    ctx.fresh_atoms(8).unwrap();
    (0..10)
        .map(|i| {
            let atom = 5 + (i % 4) as i32;
            ctx.learn_clause(vec![1, 2, 3, atom], 3).unwrap()
        })
        .collect()
}

mod policy {
    use super::*;

    #[test]
    fn half_of_the_candidates_are_marked() {
        let mut config = Config::default();
        config.clause_db.reduce_glue.value = false;
        let mut ctx = Context::from_config(config);

        let clauses = ten_extended(&mut ctx);

        // Every clause is fresh, and so within the stamp limit.
        ctx.clause_db.mark_useless_redundant_clauses_as_garbage();

        let marked = clauses
            .iter()
            .filter(|c| ctx.clause_db.is_garbage(**c))
            .count();
        assert_eq!(marked, 5);
        assert_eq!(ctx.clause_db.reduced_count(), 5);

        // With equal stamps the order falls back to references, so the marked clauses are
        // the five stored first.
        for c in &clauses[..5] {
            assert!(ctx.clause_db.is_garbage(*c));
        }
        for c in &clauses[5..] {
            assert!(!ctx.clause_db.is_garbage(*c));
        }

        assert_eq!(ctx.clause_db.kept_size(), 4);
        assert_eq!(ctx.clause_db.kept_glue(), 3);
    }

    #[test]
    fn candidates_are_marked_in_stamp_order() {
        let mut config = Config::default();
        config.clause_db.reduce_glue.value = false;
        let mut ctx = Context::from_config(config);

        let clauses = ten_extended(&mut ctx);

        // The last three sit out the first reduction as blocked clauses, so the stamp limit
        // advances to seven without any clause being marked.
        for c in &clauses[..7] {
            ctx.clause_db.note_analyzed(*c);
        }
        for c in &clauses[7..] {
            let blocking = ctx.clause_db.literals(*c)[0];
            ctx.clause_db.set_blocked(*c, blocking);
        }

        assert_eq!(ctx.reduce(), Ok(0));
        assert_eq!(ctx.clause_db.analyzed_limit(), 7);
        assert_eq!(ctx.clause_db.current_clause_count(), 10);

        // Collection relocated every clause, so references are re-read, in registry order.
        let clauses: Vec<ClauseRef> = ctx.clause_db.all_clauses().collect();
        for c in &clauses[7..] {
            ctx.clause_db.set_blocked(*c, 0);
            ctx.clause_db.note_analyzed(*c);
        }

        ctx.clause_db.mark_useless_redundant_clauses_as_garbage();

        // Candidates are the clauses with stamps one to seven, and the first half of those,
        // by stamp, is marked.
        for c in &clauses {
            let stamp = ctx.clause_db.analyzed(*c);
            match stamp {
                1..=3 => assert!(ctx.clause_db.is_garbage(*c), "stamp {stamp} marked"),
                _ => assert!(!ctx.clause_db.is_garbage(*c), "stamp {stamp} kept"),
            }
        }

        // The kept profile covers the surviving candidates, stamps four to seven.
        assert_eq!(ctx.clause_db.kept_size(), 4);
        assert_eq!(ctx.clause_db.kept_glue(), 3);

        // Within the profile, survivors are predicted to be kept by the next epoch too.
        for c in &clauses[3..] {
            assert!(ctx.clause_db.likely_to_be_kept(*c));
        }
    }

    #[test]
    fn glue_ordering_marks_no_clause_below_an_unmarked_candidate() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(8).unwrap();

        let glues = [3u32, 7, 4, 6, 3, 8, 5, 4];
        let clauses: Vec<ClauseRef> = glues
            .iter()
            .map(|glue| {
                ctx.learn_clause(vec![1, 2, 3, 4, 5, 6, 7, 8], *glue)
                    .unwrap()
            })
            .collect();

        ctx.clause_db.mark_useless_redundant_clauses_as_garbage();

        let marked_glues: Vec<u32> = clauses
            .iter()
            .filter(|c| ctx.clause_db.is_garbage(**c))
            .map(|c| ctx.clause_db.glue(*c))
            .collect();
        let kept_glues: Vec<u32> = clauses
            .iter()
            .filter(|c| !ctx.clause_db.is_garbage(**c))
            .map(|c| ctx.clause_db.glue(*c))
            .collect();

        assert_eq!(marked_glues.len(), 4);
        for marked in &marked_glues {
            for kept in &kept_glues {
                assert!(kept <= marked);
            }
        }

        assert_eq!(ctx.clause_db.kept_glue(), *kept_glues.iter().max().unwrap());
    }

    #[test]
    fn blocked_and_original_clauses_are_not_candidates() {
        let mut config = Config::default();
        config.clause_db.reduce_glue.value = false;
        let mut ctx = Context::from_config(config);
        ctx.fresh_atoms(8).unwrap();

        let original = ctx.add_clause(vec![1, 2, 3, 4]).unwrap().unwrap();
        let blocked = ctx.learn_clause(vec![-1, -2, -3, -4], 3).unwrap();
        ctx.clause_db.set_blocked(blocked, -1);
        let plain = ctx.learn_clause(vec![1, 2, 3, 5], 3).unwrap();
        let partner = ctx.learn_clause(vec![1, 2, 3, 6], 3).unwrap();

        ctx.clause_db.mark_useless_redundant_clauses_as_garbage();

        assert!(!ctx.clause_db.is_garbage(original));
        assert!(!ctx.clause_db.is_garbage(blocked));
        // Of the two candidates, one is marked.
        assert!(ctx.clause_db.is_garbage(plain));
        assert!(!ctx.clause_db.is_garbage(partner));
    }
}

mod scheduler {
    use super::*;

    #[test]
    fn reductions_wait_on_the_conflict_count() {
        let mut ctx = Context::from_config(Config::default());

        assert!(!ctx.should_reduce());
        ctx.counters.total_conflicts = 1999;
        assert!(!ctx.should_reduce());
        ctx.counters.total_conflicts = 2000;
        assert!(ctx.should_reduce());
    }

    #[test]
    fn reduction_may_be_disabled() {
        let mut config = Config::default();
        config.clause_db.reduce.value = false;
        let mut ctx = Context::from_config(config);

        ctx.counters.total_conflicts = usize::MAX;
        assert!(!ctx.should_reduce());
    }

    #[test]
    fn an_empty_epoch_still_updates_the_schedule() {
        let mut ctx = Context::from_config(Config::default());
        ctx.counters.total_conflicts = 2500;

        assert_eq!(ctx.reduce(), Ok(0));

        assert_eq!(ctx.clause_db.reductions(), 1);
        assert_eq!(ctx.clause_db.reduced_count(), 0);
        // The limit moves to the conflict count plus the increment.
        assert_eq!(ctx.clause_db.reduce_limit(), 4500);
        assert!(!ctx.should_reduce());
    }

    #[test]
    fn the_interval_grows_between_epochs() {
        let mut ctx = Context::from_config(Config::default());

        ctx.counters.total_conflicts = 2000;
        ctx.reduce().unwrap();
        assert_eq!(ctx.clause_db.reduce_limit(), 4000);

        // The increment grew by the (decaying) delta after the first epoch.
        ctx.counters.total_conflicts = 4000;
        ctx.reduce().unwrap();
        assert_eq!(ctx.clause_db.reduce_limit(), 4000 + 2300);
    }
}
