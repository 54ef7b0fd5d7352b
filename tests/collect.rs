use stoat_sat::{
    config::Config,
    context::Context,
    db::{clause::Payload, ClauseRef},
};

mod relocation {
    use super::*;

    #[test]
    fn a_garbage_reason_survives_and_the_trail_is_rewritten() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(3).unwrap();

        let c = ctx.learn_clause(vec![-1, 2], 1).unwrap();

        // Two decisions, the second of which forces atom 2 with the clause as reason.
        ctx.push_fresh_decision(3);
        ctx.push_fresh_decision(1);
        assert!(ctx.propagate().is_ok());
        assert_eq!(ctx.atom_db.value_of(2), Some(true));
        assert_eq!(ctx.atom_db.reason_of(2), Some(c));

        ctx.clause_db.mark_garbage(c);
        assert!(ctx.reduce().is_ok());

        // The clause was protected, copied, and the reason slot redirected to the copy.
        let fresh = ctx.atom_db.reason_of(2).expect("reason lost");
        assert!(ctx.clause_db.all_clauses().any(|d| d == fresh));
        assert_eq!(ctx.clause_db.literals(fresh), &[-1, 2]);
        assert!(ctx.clause_db.is_garbage(fresh));
        assert!(!ctx.clause_db.is_reason(fresh));
        assert!(!ctx.clause_db.is_moved(fresh));

        // Once the trail unwinds the clause is no longer protected, and is collected.
        ctx.backjump(0);
        assert!(ctx.reduce().is_ok());
        assert_eq!(ctx.clause_db.current_clause_count(), 0);
    }

    #[test]
    fn bytes_are_conserved_across_an_epoch() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(6).unwrap();

        ctx.add_clause(vec![1, 2, 3]).unwrap();
        ctx.add_clause(vec![-1, -2, -3, -4]).unwrap();
        let a = ctx.learn_clause(vec![-1, 2], 1).unwrap();
        let b = ctx.learn_clause(vec![2, 3, 4], 2).unwrap();
        ctx.learn_clause(vec![-2, -3], 1).unwrap();

        ctx.clause_db.mark_garbage(a);
        ctx.clause_db.mark_garbage(b);

        let bytes = |ctx: &Context| -> usize {
            ctx.clause_db
                .all_clauses()
                .map(|c| ctx.clause_db.bytes(c))
                .sum()
        };

        let before = bytes(&ctx);
        let already_collected = ctx.clause_db.collected_bytes();
        let freed = ctx.reduce().unwrap();

        assert_eq!(before - freed, bytes(&ctx));
        assert_eq!(ctx.clause_db.collected_bytes(), already_collected + freed);
        assert_eq!(ctx.clause_db.garbage_bytes(), 0);
        assert_eq!(ctx.clause_db.current_clause_count(), 3);
    }

    #[test]
    fn survivors_preserve_their_literals_and_are_never_seen_moved() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(8).unwrap();

        let mut stored: Vec<Vec<i32>> = Vec::default();
        for i in 4..8 {
            let clause = vec![1, 2, 3, i];
            ctx.add_clause(clause.clone()).unwrap();
            stored.push(clause);
        }
        let garbage = ctx.learn_clause(vec![-1, -2], 1).unwrap();
        ctx.clause_db.mark_garbage(garbage);

        assert!(ctx.reduce().is_ok());

        let survivors: Vec<ClauseRef> = ctx.clause_db.all_clauses().collect();
        assert_eq!(survivors.len(), stored.len());
        for (c, literals) in survivors.iter().zip(&stored) {
            assert!(!ctx.clause_db.is_moved(*c));
            assert!(!ctx.clause_db.is_garbage(*c));
            assert!(
                matches!(ctx.clause_db.payload(*c), Payload::Literals(l) if l == literals.as_slice())
            );
        }
    }

    #[test]
    fn watchers_are_rewritten_and_propagation_continues() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(4).unwrap();

        ctx.add_clause(vec![-1, 2]).unwrap();
        ctx.add_clause(vec![-2, 3]).unwrap();
        ctx.add_clause(vec![-3, 4]).unwrap();
        let garbage = ctx.learn_clause(vec![-1, -4], 1).unwrap();
        ctx.clause_db.mark_garbage(garbage);

        assert!(ctx.reduce().is_ok());

        // Every surviving watcher dereferences to a live clause.
        let live: Vec<ClauseRef> = ctx.clause_db.all_clauses().collect();
        for atom in 1..=4 {
            for literal in [-(atom as i32), atom as i32] {
                for watcher in ctx.watches.list(literal) {
                    assert!(live.contains(&watcher.clause));
                    assert!(!ctx.clause_db.is_garbage(watcher.clause));
                }
            }
        }

        // And the rewritten lists still drive propagation.
        ctx.push_fresh_decision(1);
        assert!(ctx.propagate().is_ok());
        assert_eq!(ctx.atom_db.value_of(4), Some(true));
    }
}

mod satisfied {
    use super::*;

    #[test]
    fn root_satisfied_clauses_are_collected() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(4).unwrap();

        ctx.add_clause(vec![1, 2]).unwrap();
        ctx.add_clause(vec![2, 3, 4]).unwrap();
        ctx.add_clause(vec![1]).unwrap();
        assert!(ctx.propagate().is_ok());

        assert!(ctx.reduce().is_ok());

        // The clause satisfied by the root assignment of atom 1 is gone.
        let remaining: Vec<Vec<i32>> = ctx
            .clause_db
            .all_clauses()
            .map(|c| ctx.clause_db.literals(c).to_vec())
            .collect();
        assert_eq!(remaining, vec![vec![2, 3, 4]]);
    }

    #[test]
    fn root_falsified_literals_are_flushed() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(4).unwrap();

        let c = ctx.add_clause(vec![-1, 2, 3, 4]).unwrap().unwrap();
        ctx.add_clause(vec![1]).unwrap();

        // Root propagation moves the watch off the falsified literal.
        assert!(ctx.propagate().is_ok());

        assert!(ctx.reduce().is_ok());
        let _ = c; // relocated by the epoch

        let clauses: Vec<ClauseRef> = ctx.clause_db.all_clauses().collect();
        assert_eq!(clauses.len(), 1);
        let fresh = clauses[0];

        let mut literals = ctx.clause_db.literals(fresh).to_vec();
        literals.sort_unstable();
        assert_eq!(literals, vec![2, 3, 4]);
        assert_eq!(ctx.clause_db.size(fresh), 3);

        // Watchers cached the old size, and were refreshed during the collection.
        for literal in ctx.clause_db.literals(fresh).to_vec() {
            for watcher in ctx.watches.list(literal) {
                if watcher.clause == fresh {
                    assert_eq!(watcher.size, 3);
                }
            }
        }
    }
}
