#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;

    use crate::builder::{BuilderInvalidReason, FarmBuilder};
    use crate::groups::search_groups;
    use crate::parse::{parse_farm, ParseError};
    use crate::paths::{enumerate_paths, path_of};
    use crate::schedule::{assign, Assignment};
    use crate::select::{score, select_group};
    use crate::{Farm, Location, RoomId, SolveError, SolverLimits, Stage};

    fn farm(text: &str) -> Farm {
        parse_farm(text).unwrap()
    }

    // start and end are adjacent, with two detours of different length
    const FORKED: &str = "5
##start
0 0 0
##end
1 9 9
a 1 1
b 2 2
c 3 3
0-a
a-1
0-b
b-c
c-1
0-1
";

    // a small mesh with overlapping routes and no direct tunnel
    const MESH: &str = "7
##start
s 0 0
a 1 0
b 2 0
c 1 1
d 2 1
f 1 2
##end
e 3 1
s-a
a-b
b-e
s-c
c-d
d-e
a-c
b-d
s-f
f-d
";

    #[test]
    fn direct_tunnel_queues_every_agent() {
        let farm = farm("4\n##start\n0 0 0\n##end\n1 1 1\n0-1\n");
        let solution = farm.solve().unwrap();

        assert_eq!(solution.log.to_string(), "L1-1
L2-1
L3-1
L4-1");
    }

    #[test]
    fn shortcut_and_detour() {
        let farm = farm("3\n##start\n0 0 0\n2 1 1\n##end\n1 2 2\n0-2\n2-1\n0-1\n");
        let solution = farm.solve().unwrap();

        assert_eq!(solution.group, vec![0, 1]);
        assert_eq!(solution.log.to_string(), "L1-1 L2-2
L2-1 L3-1");
    }

    #[test]
    fn disconnected_farm_has_no_route() {
        let farm = farm("2\n##start\n0 0 0\n2 1 1\n##end\n1 2 2\n3 3 3\n0-2\n3-1\n");

        assert_eq!(farm.solve().unwrap_err(), SolveError::NoRoute);
    }

    #[test]
    fn single_agent_direct_tunnel() {
        let farm = farm("1\n##start\nhome 0 0\n##end\naway 5 5\nhome-away\n");

        assert_eq!(farm.solve().unwrap().log.to_string(), "L1-away");
    }

    #[test]
    fn equal_disjoint_paths_alternate() {
        let farm = farm("4\n##start\n0 0 0\n##end\n1 2 0\na 1 1\nb 1 -1\n0-a\na-1\n0-b\nb-1\n");
        let solution = farm.solve().unwrap();

        assert_eq!(solution.assignments, vec![
            Assignment { path: 0, start_turn: 1 },
            Assignment { path: 1, start_turn: 1 },
            Assignment { path: 0, start_turn: 2 },
            Assignment { path: 1, start_turn: 2 },
        ]);
        assert_eq!(solution.log.to_string(), "L1-a L2-b
L1-1 L2-1 L3-a L4-b
L3-1 L4-1");
    }

    #[test]
    fn single_corridor_pipelines_agents() {
        let farm = farm("3\n##start\n0 1 0\n##end\n1 5 0\n2 9 0\n3 13 0\n0-2\n2-3\n3-1\n");

        assert_eq!(farm.solve().unwrap().log.to_string(), "L1-2
L1-3 L2-2
L1-1 L2-3 L3-2
L2-1 L3-3
L3-1");
    }

    #[test]
    fn forked_farm_uses_every_route() {
        let farm = farm(FORKED);
        let solution = farm.solve().unwrap();

        assert_eq!(solution.group, vec![0, 1, 2]);
        assert_eq!(solution.score.to_string(), "4");
        assert_eq!(solution.log.turns(), 3);
        assert_eq!(solution.log.to_string(), "L1-1 L2-a L3-b
L2-1 L3-c L4-1 L5-a
L3-1 L5-1");
    }

    #[test]
    fn adjacency_is_symmetric_and_ordered() {
        let farm = farm(MESH);

        for tunnel in farm.tunnels() {
            assert!(farm.neighbors(tunnel.0).contains(&tunnel.1));
            assert!(farm.neighbors(tunnel.1).contains(&tunnel.0));
        }

        let start_neighbors = farm.neighbors(farm.start())
            .map(|room| farm.room(room).name())
            .collect_vec();
        assert_eq!(start_neighbors, vec!["a", "c", "f"]);
    }

    #[test]
    fn enumeration_order() {
        let farm = farm(FORKED);
        let paths = enumerate_paths(&farm, &SolverLimits::unbounded()).unwrap();

        assert_eq!(paths.iter().map(|path| path.describe(&farm)).collect_vec(), vec!["0-1", "0-a-1", "0-b-c-1"]);
        assert!(paths[0].is_direct());
        assert!(paths[0].interior().is_empty());
    }

    #[test]
    fn enumerated_paths_are_simple_and_sorted() {
        let farm = farm(MESH);
        let paths = enumerate_paths(&farm, &SolverLimits::unbounded()).unwrap();

        assert!(paths.len() > 3);
        for path in &paths {
            assert_eq!(path.rooms().first(), Some(&farm.start()));
            assert_eq!(path.rooms().last(), Some(&farm.end()));
            assert!(path.rooms().iter().all_unique());
            for (a, b) in path.rooms().iter().tuple_windows() {
                assert!(farm.neighbors(*a).contains(b));
            }
        }
        assert!(paths.iter().tuple_windows().all(|(a, b)| a.len() <= b.len()));
    }

    #[test]
    fn groups_are_interior_disjoint() {
        let farm = farm(MESH);
        let paths = enumerate_paths(&farm, &SolverLimits::unbounded()).unwrap();
        let groups = search_groups(&paths, farm.agents(), farm.rooms().len(), usize::MAX).unwrap();

        assert!(!groups.is_empty());
        for group in &groups {
            assert!(!group.is_empty() && group.len() <= farm.agents());
            for (a, b) in group.iter().tuple_combinations() {
                assert!(paths[*a].interior().iter().all(|room| !paths[*b].interior().contains(room)));
            }
        }

        let solution = farm.solve().unwrap();
        assert_eq!(solution.group.len(), 2);
    }

    #[test]
    fn groups_are_recorded_depth_first() {
        let farm = farm("4\n##start\n0 0 0\n##end\n1 2 0\na 1 1\nb 1 -1\n0-a\na-1\n0-b\nb-1\n");
        let paths = enumerate_paths(&farm, &SolverLimits::unbounded()).unwrap();

        assert_eq!(search_groups(&paths, 4, farm.rooms().len(), usize::MAX).unwrap(), vec![
            vec![0, 1],
            vec![0],
            vec![1, 0],
            vec![1],
        ]);
    }

    #[test]
    fn group_search_stops_at_agent_count() {
        let farm = farm(FORKED);
        let paths = enumerate_paths(&farm, &SolverLimits::unbounded()).unwrap();

        // the direct tunnel is seeded, and one agent needs nothing more
        assert_eq!(search_groups(&paths, 1, farm.rooms().len(), usize::MAX).unwrap(), vec![vec![0]]);
        assert_eq!(search_groups(&paths, 2, farm.rooms().len(), usize::MAX).unwrap(), vec![
            vec![0, 1],
            vec![0, 2],
            vec![0],
        ]);
    }

    #[test]
    fn scoring_and_ties() {
        let paths = vec![
            path_of(vec![RoomId(0), RoomId(1)]),
            path_of(vec![RoomId(0), RoomId(2), RoomId(1)]),
        ];

        assert_eq!(score(&vec![0, 1], &paths, 3).to_string(), "3");
        assert_eq!(score(&vec![0], &paths, 3).to_string(), "6");

        let (group, turns) = select_group(&[vec![0], vec![0, 1], vec![1, 0]], &paths, 3).unwrap();
        assert_eq!(group, vec![0, 1]);
        assert_eq!(turns.to_string(), "3");

        assert_eq!(select_group(&[], &paths, 3).unwrap_err(), SolveError::NoGroup);
    }

    #[test]
    fn late_agent_takes_faster_slot() {
        let paths = vec![
            path_of(vec![RoomId(0), RoomId(1)]),
            path_of(vec![RoomId(0), RoomId(2), RoomId(3), RoomId(4), RoomId(1)]),
        ];

        // agent 2 would arrive at 5 + 1 on the long path, but the short path's next wave arrives at 2 + 2
        assert_eq!(assign(&vec![0, 1], &paths, 2), vec![
            Assignment { path: 0, start_turn: 1 },
            Assignment { path: 0, start_turn: 2 },
        ]);
    }

    #[test]
    fn every_agent_walks_its_whole_path() {
        let farm = farm(MESH);
        let solution = farm.solve().unwrap();

        for (index, assignment) in solution.assignments.iter().enumerate() {
            let turns = solution.log.moves().iter()
                .enumerate()
                .filter(|(_, moves)| moves.iter().any(|step| step.agent == index + 1))
                .map(|(turn, _)| turn)
                .collect_vec();

            assert_eq!(turns.len(), solution.paths[assignment.path].len() - 1);
            assert!(turns.iter().tuple_windows().all(|(a, b)| a < b));
            assert_eq!(turns[0] + 1, assignment.start_turn);
        }
    }

    #[test]
    fn solving_is_deterministic() {
        let first = farm(MESH).solve().unwrap().log.to_string();
        let second = farm(MESH).solve().unwrap().log.to_string();

        assert_eq!(first, second);
    }

    #[test]
    fn limits_are_enforced() {
        let farm = farm(FORKED);

        assert_eq!(
            farm.solve_with(&SolverLimits::default().with_max_paths(2)).unwrap_err(),
            SolveError::ResourceExhausted { stage: Stage::PathEnumeration, limit: 2 },
        );
        assert!(farm.solve_with(&SolverLimits::default().with_max_paths(3)).is_ok());
        assert_eq!(
            farm.solve_with(&SolverLimits::default().with_max_groups(2)).unwrap_err(),
            SolveError::ResourceExhausted { stage: Stage::GroupSearch, limit: 2 },
        );
        assert!(farm.solve_with(&SolverLimits::unbounded()).is_ok());
    }

    /// Start sits in a clique of `size` rooms; the end connects to the start directly when `reachable`.
    fn clique_farm(size: usize, reachable: bool) -> Farm {
        let mut builder = FarmBuilder::with_agents(NonZero::new(1).unwrap());
        builder.add_start("s", Location(0, 0)).add_end("e", Location(-1, -1));
        if reachable {
            builder.add_tunnel("s", "e");
        }
        for i in 0..size {
            builder.add_room(&format!("k{}", i), Location(i as i64 + 1, 0));
            builder.add_tunnel("s", &format!("k{}", i));
            for j in 0..i {
                builder.add_tunnel(&format!("k{}", j), &format!("k{}", i));
            }
        }

        builder.build().unwrap()
    }

    #[test]
    fn unreachable_end_fails_before_searching() {
        // walking every simple path of a 16-room clique would take hours
        let farm = clique_farm(16, false);

        assert_eq!(farm.solve().unwrap_err(), SolveError::NoRoute);
        assert_eq!(enumerate_paths(&farm, &SolverLimits::unbounded()).unwrap_err(), SolveError::NoRoute);
    }

    #[test]
    fn dead_end_branches_count_against_expansions() {
        let farm = clique_farm(10, true);

        assert_eq!(
            farm.solve_with(&SolverLimits::default().with_max_expansions(1_000)).unwrap_err(),
            SolveError::ResourceExhausted { stage: Stage::PathEnumeration, limit: 1_000 },
        );

        let small = clique_farm(3, true);
        let solution = small.solve_with(&SolverLimits::default().with_max_expansions(1_000)).unwrap();
        assert_eq!(solution.log.to_string(), "L1-e");
    }

    #[test]
    fn long_corridor_does_not_exhaust_the_stack() {
        let length = 200_000;
        let mut builder = FarmBuilder::with_agents(NonZero::new(1).unwrap());
        builder.add_start("s", Location(-1, 0)).add_end("e", Location(length as i64, 0));
        let mut previous = "s".to_owned();
        for i in 0..length {
            let name = format!("r{}", i);
            builder.add_room(&name, Location(i as i64, 0)).add_tunnel(&previous, &name);
            previous = name;
        }
        builder.add_tunnel(&previous, "e");
        let farm = builder.build().unwrap();

        let solution = farm.solve().unwrap();
        assert_eq!(solution.paths.len(), 1);
        assert_eq!(solution.paths[0].len(), length + 2);
        assert_eq!(solution.log.turns(), length + 1);
        assert_eq!(solution.log.lines().last().map(String::as_str), Some("L1-e"));
    }

    #[test]
    fn builder_rejects_bad_rooms() {
        let agents = NonZero::new(1).unwrap();

        let built = FarmBuilder::with_agents(agents)
            .add_start("L1", Location(0, 0))
            .add_end("b", Location(1, 1))
            .build();
        assert_eq!(built.unwrap_err(), vec![BuilderInvalidReason::BadRoomName]);

        let built = FarmBuilder::with_agents(agents)
            .add_start("a", Location(0, 0))
            .add_room("a", Location(1, 1))
            .build();
        assert_eq!(built.unwrap_err(), vec![BuilderInvalidReason::DuplicateName]);

        let built = FarmBuilder::with_agents(agents)
            .add_start("a", Location(0, 0))
            .add_end("b", Location(0, 0))
            .build();
        assert_eq!(built.unwrap_err(), vec![BuilderInvalidReason::DuplicateLocation]);

        let mut builder = FarmBuilder::with_agents(agents);
        builder.add_start("a", Location(0, 0)).add_start("b", Location(1, 1));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::DuplicateStart]));
    }

    #[test]
    fn builder_rejects_bad_tunnels() {
        let built = FarmBuilder::with_agents(NonZero::new(2).unwrap())
            .add_tunnel("a", "b")
            .add_start("a", Location(0, 0))
            .add_room("b", Location(1, 1))
            .add_tunnel("b", "a")
            .add_tunnel("b", "b")
            .add_tunnel("b", "z")
            .build();

        assert_eq!(built.unwrap_err(), vec![
            BuilderInvalidReason::MissingEnd,
            BuilderInvalidReason::DuplicateTunnel,
            BuilderInvalidReason::SelfTunnel,
            BuilderInvalidReason::UnknownRoom,
        ]);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_farm("").unwrap_err(), ParseError::Empty);
        assert_eq!(parse_farm("0\n##start\na 0 0\n").unwrap_err(), ParseError::BadAgentCount { line: 1 });
        assert_eq!(parse_farm("2\n##start\na 0 0\nb x 1\n").unwrap_err(), ParseError::BadRoom { line: 4 });
        assert_eq!(parse_farm("2\n##start\na 0 0\n##end\nb 1 1\na-b-c\n").unwrap_err(), ParseError::BadTunnel { line: 6 });
        assert_eq!(parse_farm("2\n##start\n##end\nb 1 1\n").unwrap_err(), ParseError::DanglingDirective { line: 2 });
        assert_eq!(parse_farm("2\n##start\na 0 0\n##end\n").unwrap_err(), ParseError::DanglingDirective { line: 4 });
        assert_eq!(
            parse_farm("2\n##start\na 0 0\n##end\nb 1 1\na-b\nc 2 2\n").unwrap_err(),
            ParseError::RoomAfterTunnels { line: 7 },
        );
        assert_eq!(parse_farm("2\n##start\na 0 0\nb 1 1\na-b\n").unwrap_err(), ParseError::Invalid(vec![BuilderInvalidReason::MissingEnd]));
    }

    #[test]
    fn parse_skips_comments_and_spacing() {
        let farm = farm("# colony\r\n  2  \r\n\r\n##start\r\nhome   0 0\r\n# a note\r\n##end\r\naway 4 -4\r\n\r\nhome-away\r\n");

        assert_eq!(farm.agents(), 2);
        assert_eq!(farm.room(farm.start()).name(), "home");
        assert_eq!(farm.room(farm.end()).location(), Location(4, -4));
        assert_eq!(farm.room_by_name("away"), Some(farm.end()));
    }

    #[test]
    fn display_farm() {
        let farm = farm("3\n##start\n0 0 0\n2 1 1\n##end\n1 2 2\n0-2\n2-1\n0-1\n");

        assert_eq!(format!("{}", farm), "3
##start
0 0 0
2 1 1
##end
1 2 2
0-2
2-1
0-1
");
    }
}
