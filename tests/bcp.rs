use stoat_sat::{
    config::Config,
    context::Context,
    types::err::BCPError,
};

mod propagation {
    use super::*;

    #[test]
    fn consequences_follow_a_chain() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(4).unwrap();

        let ab = ctx.add_clause(vec![-1, 2]).unwrap().unwrap();
        let bc = ctx.add_clause(vec![-2, 3]).unwrap().unwrap();
        let cd = ctx.add_clause(vec![-3, 4]).unwrap().unwrap();

        ctx.push_fresh_decision(1);
        assert!(ctx.propagate().is_ok());

        assert_eq!(ctx.atom_db.value_of(2), Some(true));
        assert_eq!(ctx.atom_db.value_of(3), Some(true));
        assert_eq!(ctx.atom_db.value_of(4), Some(true));

        assert_eq!(ctx.atom_db.reason_of(2), Some(ab));
        assert_eq!(ctx.atom_db.reason_of(3), Some(bc));
        assert_eq!(ctx.atom_db.reason_of(4), Some(cd));
    }

    #[test]
    fn a_falsified_clause_is_reported() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(2).unwrap();

        ctx.add_clause(vec![1, 2]).unwrap();
        let conflicting = ctx.add_clause(vec![1, -2]).unwrap().unwrap();

        ctx.push_fresh_decision(-1);
        let result = ctx.propagate();

        assert_eq!(result, Err(BCPError::Conflict(conflicting)));
        assert_eq!(ctx.counters.total_conflicts, 1);
    }

    #[test]
    fn watches_migrate_and_the_position_is_saved() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(4).unwrap();

        let c = ctx.add_clause(vec![1, 2, 3, 4]).unwrap().unwrap();
        assert!(ctx.clause_db.has_pos(c));

        ctx.push_fresh_decision(-1);
        assert!(ctx.propagate().is_ok());
        // The falsified watch was replaced by the third literal.
        assert_eq!(ctx.clause_db.pos(c), 2);
        assert!(ctx.watches.list(3).iter().any(|w| w.clause == c));

        ctx.push_fresh_decision(-2);
        assert!(ctx.propagate().is_ok());
        assert_eq!(ctx.clause_db.pos(c), 3);
        assert!(ctx.watches.list(4).iter().any(|w| w.clause == c));

        // With every other literal falsified, the remaining watch is forced.
        ctx.push_fresh_decision(-3);
        assert!(ctx.propagate().is_ok());
        assert_eq!(ctx.atom_db.value_of(4), Some(true));
        assert_eq!(ctx.atom_db.reason_of(4), Some(c));
    }

    #[test]
    fn backjumping_reopens_the_queue() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(3).unwrap();

        ctx.add_clause(vec![-1, 2]).unwrap();
        ctx.add_clause(vec![1, 3]).unwrap();

        ctx.push_fresh_decision(1);
        assert!(ctx.propagate().is_ok());
        assert_eq!(ctx.atom_db.value_of(2), Some(true));

        ctx.backjump(0);
        assert_eq!(ctx.atom_db.value_of(1), None);
        assert_eq!(ctx.atom_db.value_of(2), None);

        ctx.push_fresh_decision(-1);
        assert!(ctx.propagate().is_ok());
        assert_eq!(ctx.atom_db.value_of(3), Some(true));
    }

    #[test]
    fn satisfied_watchers_rest_on_the_blocking_literal() {
        let mut ctx = Context::from_config(Config::default());
        ctx.fresh_atoms(3).unwrap();

        // Atom 2 satisfies the clause, and watch positions are untouched by later
        // propagations over the falsified watch.
        let c = ctx.add_clause(vec![1, 2, 3]).unwrap().unwrap();

        ctx.push_fresh_decision(2);
        assert!(ctx.propagate().is_ok());
        ctx.push_fresh_decision(-1);
        assert!(ctx.propagate().is_ok());

        assert_eq!(ctx.clause_db.literals(c), &[1, 2, 3]);
        assert_eq!(ctx.atom_db.value_of(3), None);
    }
}
