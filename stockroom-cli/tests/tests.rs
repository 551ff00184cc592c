#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;
    use float_cmp::approx_eq;
    use tempfile::TempDir;
    use test_case::test_case;

    use stockroom::entities::{CellIndex, Warehouse};
    use stockroom::util::{TEST_DATABASE_FILE, WarehouseConfig};
    use stockroom_cli::commands;
    use stockroom_cli::config::CliConfig;
    use stockroom_cli::io;
    use stockroom_cli::io::cli::{Cli, Command, ShapeArg};

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    fn warehouse_in(dir: &TempDir) -> Warehouse {
        let config = WarehouseConfig {
            database_path: dir.path().join("database.txt"),
            ..WarehouseConfig::default()
        };
        Warehouse::with_config(4, 3, config)
    }

    fn run(command: &Command, warehouse: &mut Warehouse) -> Result<(bool, String)> {
        let mut out = Vec::new();
        let changed = commands::execute(command, warehouse, &mut out)?;
        Ok((changed, String::from_utf8(out)?))
    }

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("stockroom").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn parses_add_command() {
        let command = parse(&["add", "cuboid", "10", "20", "30", "-d", "shelf", "-w", "2.5", "--fragile"]);
        match command {
            Command::Add {
                shape,
                dimensions,
                description,
                weight,
                fragile,
                location,
                floor,
            } => {
                assert_eq!(shape, ShapeArg::Cuboid);
                assert_eq!(dimensions, vec![10, 20, 30]);
                assert_eq!(description, "shelf");
                assert!(approx_eq!(f64, weight, 2.5));
                assert!(fragile);
                assert_eq!((location, floor), (None, None));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_data_flag_selects_test_database() {
        let cli = Cli::try_parse_from(["stockroom", "--test-data", "list"]).unwrap();
        assert_eq!(cli.database_path(), Some(PathBuf::from(TEST_DATABASE_FILE)));
        let cli = Cli::try_parse_from(["stockroom", "list"]).unwrap();
        assert_eq!(cli.database_path(), None);
    }

    #[test_case(&["stockroom", "-d", "a.txt", "--test-data", "list"]; "database conflicts with test data")]
    #[test_case(&["stockroom", "add", "cube", "5", "-w", "1"]; "missing description")]
    #[test_case(&["stockroom", "add", "cube", "5", "-d", "x", "-w", "1", "--location", "1"]; "location without floor")]
    #[test_case(&["stockroom", "add", "cone", "5", "-d", "x", "-w", "1"]; "unknown shape")]
    #[test_case(&["stockroom", "show", "1"]; "show without floor")]
    fn invalid_arguments_are_rejected(args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn add_find_move_remove() -> Result<()> {
        init_logger();
        let dir = TempDir::new()?;
        let mut warehouse = warehouse_in(&dir);

        let (changed, report) = run(&parse(&["add", "cube", "50", "-d", "gift", "-w", "5"]), &mut warehouse)?;
        assert!(changed);
        assert!(report.contains("location 1, floor 1"), "{report}");
        assert!(report.contains("id 1"), "{report}");

        let (changed, report) = run(&parse(&["find", "1"]), &mut warehouse)?;
        assert!(!changed);
        assert!(report.contains("Description: gift"), "{report}");

        run(&parse(&["move", "1", "3", "2"]), &mut warehouse)?;
        assert_eq!(warehouse.find_box(1), Some(CellIndex::new(3, 2)));

        let (_, report) = run(&parse(&["show", "3", "2"]), &mut warehouse)?;
        assert!(report.contains("Type: Cube, ID: 1"), "{report}");

        run(&parse(&["remove", "1"]), &mut warehouse)?;
        assert_eq!(warehouse.n_boxes(), 0);
        assert!(run(&parse(&["remove", "1"]), &mut warehouse).is_err());
        assert!(run(&parse(&["find", "1"]), &mut warehouse).is_err());
        Ok(())
    }

    #[test]
    fn add_saves_database() -> Result<()> {
        let dir = TempDir::new()?;
        let mut warehouse = warehouse_in(&dir);
        run(&parse(&["add", "blob", "3", "-d", "slime", "-w", "1"]), &mut warehouse)?;

        let mut reloaded = warehouse_in(&dir);
        reloaded.load()?;
        assert_eq!(reloaded.n_boxes(), 1);
        assert!(reloaded.stored_boxes().all(|(_, b)| b.is_fragile()));
        Ok(())
    }

    #[test]
    fn list_groups_boxes_by_cell() -> Result<()> {
        let dir = TempDir::new()?;
        let mut warehouse = warehouse_in(&dir);
        warehouse.set_auto_save(false);

        let (_, report) = run(&Command::List, &mut warehouse)?;
        assert_eq!(report, "The warehouse is empty.\n");

        run(&parse(&["add", "cube", "1", "-d", "a", "-w", "1"]), &mut warehouse)?;
        run(&parse(&["add", "cube", "1", "-d", "b", "-w", "1"]), &mut warehouse)?;
        run(&parse(&["add", "sphere", "1", "-d", "c", "-w", "1", "--location", "2", "--floor", "2"]), &mut warehouse)?;
        let (_, report) = run(&Command::List, &mut warehouse)?;
        assert_eq!(
            report,
            "location 1, floor 1:\n  Type: Cube, ID: 1\n  Type: Cube, ID: 2\nlocation 2, floor 2:\n  Type: Sphere, ID: 3\n"
        );
        Ok(())
    }

    #[test_case(&["add", "cube", "1", "2", "-d", "x", "-w", "1"]; "too many dimensions")]
    #[test_case(&["add", "cuboid", "1", "2", "-d", "x", "-w", "1"]; "too few dimensions")]
    #[test_case(&["add", "cube", "1", "-d", " ", "-w", "1"]; "blank description")]
    #[test_case(&["add", "cube", "1", "-d", "x", "-w", "-1"]; "negative weight")]
    #[test_case(&["add", "cube", "1", "-d", "x", "-w", "1", "--location", "0", "--floor", "1"]; "reserved location")]
    #[test_case(&["add", "cube", "1", "-d", "x", "-w", "1", "--location", "4", "--floor", "1"]; "location out of range")]
    #[test_case(&["add", "cube", "500", "-d", "x", "-w", "1"]; "no room")]
    #[test_case(&["show", "1", "3"]; "floor out of range")]
    #[test_case(&["move", "9", "1", "1"]; "move unknown box")]
    fn failing_commands_leave_warehouse_unchanged(args: &[&str]) {
        let dir = TempDir::new().unwrap();
        let mut warehouse = warehouse_in(&dir);
        warehouse.set_auto_save(false);
        assert!(run(&parse(args), &mut warehouse).is_err());
        assert_eq!(warehouse.n_boxes(), 0);
    }

    #[test]
    fn unsaved_change_is_reported() -> Result<()> {
        let dir = TempDir::new()?;
        let mut warehouse = warehouse_in(&dir);
        warehouse.set_auto_save(false);
        // a directory cannot be written as a file
        warehouse.set_database_path(dir.path());

        let mut out = Vec::new();
        let command = parse(&["add", "cube", "5", "-d", "gift", "-w", "1"]);
        assert!(commands::run(&command, &mut warehouse, &mut out).is_err());
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn run_saves_changes() -> Result<()> {
        let dir = TempDir::new()?;
        let mut warehouse = warehouse_in(&dir);
        warehouse.set_auto_save(false);

        let mut out = Vec::new();
        commands::run(&parse(&["add", "cube", "5", "-d", "gift", "-w", "1"]), &mut warehouse, &mut out)?;
        assert!(String::from_utf8(out)?.contains("id 1"));

        let mut reloaded = warehouse_in(&dir);
        reloaded.load()?;
        assert_eq!(reloaded.n_boxes(), 1);
        Ok(())
    }

    #[test]
    fn long_description_is_rejected() {
        let description = "x".repeat(101);
        assert!(commands::validate_description(&description).is_err());
        assert!(commands::validate_description(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn refused_move_keeps_box() -> Result<()> {
        let dir = TempDir::new()?;
        let mut warehouse = warehouse_in(&dir);
        warehouse.set_auto_save(false);
        run(&parse(&["add", "blob", "1", "-d", "a", "-w", "1"]), &mut warehouse)?;
        run(&parse(&["add", "cube", "1", "-d", "b", "-w", "1"]), &mut warehouse)?;
        assert!(run(&parse(&["move", "2", "1", "1"]), &mut warehouse).is_err());
        assert_eq!(warehouse.find_box(2), Some(CellIndex::new(1, 2)));
        Ok(())
    }

    #[test]
    fn partial_config_file_keeps_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "n_floors": 6, "warehouse": { "auto_save": false } }"#)?;

        let config = io::read_config(&path)?;
        assert_eq!(config.n_floors, 6);
        assert_eq!(config.n_locations, CliConfig::default().n_locations);
        assert!(!config.warehouse.auto_save);
        assert_eq!(config.warehouse.cell, CliConfig::default().warehouse.cell);
        config.validate()?;
        Ok(())
    }

    #[test]
    fn malformed_config_file_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ n_floors: }")?;
        assert!(io::read_config(&path).is_err());

        let config = CliConfig {
            n_locations: 1,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
        Ok(())
    }

    #[test_case(0, 250, 200; "zero height")]
    #[test_case(150, 250, 0; "zero depth")]
    #[test_case(u32::MAX, u32::MAX, u32::MAX; "volume overflows")]
    fn invalid_cell_dimensions_are_rejected(height: u32, width: u32, depth: u32) {
        let mut config = CliConfig::default();
        config.warehouse.cell.height = height;
        config.warehouse.cell.width = width;
        config.warehouse.cell.depth = depth;
        assert!(config.validate().is_err());
    }
}
