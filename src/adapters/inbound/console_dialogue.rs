use crate::domains::simulation::{parse_commands, Field, FieldSize, Pose};
use std::io::{self, BufRead, Write};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Welcome,
    Main,
    BuildCar,
    Simulation,
    Exit,
    Done,
}

/// Interactive front end: collects the field size and cars from a line-based
/// input, validates every answer and prints the simulation results.
///
/// Generic over its input and output so a whole session can be scripted.
/// Running out of input ends the session without the farewell message.
pub struct ConsoleDialogue<R, W> {
    input: R,
    output: W,
    field: Option<Field>,
    stage: Stage,
}

impl<R: BufRead, W: Write> ConsoleDialogue<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            field: None,
            stage: Stage::Welcome,
        }
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> io::Result<()> {
        while self.stage != Stage::Done {
            let next = match self.stage {
                Stage::Welcome => self.welcome_stage()?,
                Stage::Main => self.main_menu_stage()?,
                Stage::BuildCar => self.build_car_stage()?,
                Stage::Simulation => self.simulation_stage()?,
                Stage::Exit => self.exit_stage()?,
                Stage::Done => Stage::Done,
            };
            debug!(from = ?self.stage, to = ?next, "stage transition");
            self.stage = next;
        }
        self.output.flush()
    }

    /// Next line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn welcome_stage(&mut self) -> io::Result<Stage> {
        writeln!(
            self.output,
            "Welcome to Auto Driving Car Simulation!\n\n\
             Please enter the width and height of the simulation field in x y format:"
        )?;

        let size = loop {
            let Some(line) = self.read_line()? else {
                return Ok(Stage::Done);
            };
            match line.parse::<FieldSize>() {
                Ok(size) => break size,
                Err(_) => writeln!(
                    self.output,
                    "\nPlease enter a valid width and height in x y format (i.e. \"10 10\"):"
                )?,
            }
        };

        writeln!(self.output, "\nYou have created a field of {}.", size)?;
        self.field = Some(Field::new(size));
        Ok(Stage::Main)
    }

    fn main_menu_stage(&mut self) -> io::Result<Stage> {
        loop {
            writeln!(
                self.output,
                "\nPlease choose from the following options:\n\
                 [1] Add a car to field\n\
                 [2] Run simulation"
            )?;
            let Some(option) = self.read_line()? else {
                return Ok(Stage::Done);
            };

            match option.as_str() {
                "1" => return Ok(Stage::BuildCar),
                "2" if self.car_count() == 0 => writeln!(
                    self.output,
                    "Unable to run simulation. There are no cars currently."
                )?,
                "2" => return Ok(Stage::Simulation),
                "0" => return Ok(Stage::Exit),
                other => writeln!(self.output, "\"{}\" is not a valid option", other)?,
            }
        }
    }

    fn build_car_stage(&mut self) -> io::Result<Stage> {
        writeln!(self.output, "\nPlease enter the name of the car:")?;
        let name = loop {
            let Some(name) = self.read_line()? else {
                return Ok(Stage::Done);
            };
            if name.trim().is_empty() {
                writeln!(self.output, "Please enter a name for the car:")?;
            } else if self.is_car_name_used(&name) {
                writeln!(
                    self.output,
                    "\"{}\" is already used. Please enter another name for the car:",
                    name
                )?;
            } else {
                break name;
            }
        };

        writeln!(
            self.output,
            "\nPlease enter initial position of {} in x y Direction format:",
            name
        )?;
        let pose = loop {
            let Some(line) = self.read_line()? else {
                return Ok(Stage::Done);
            };
            match line.parse::<Pose>() {
                Err(_) => writeln!(
                    self.output,
                    "Please enter a valid position in x y Direction format (i.e \"1 2 N\"):"
                )?,
                Ok(pose) if !self.is_inside(pose) => writeln!(
                    self.output,
                    "Given position is out of bounds. Please enter a valid position in x y Direction format:"
                )?,
                Ok(pose) => break pose,
            }
        };

        writeln!(self.output, "Please enter the commands for {}:", name)?;
        let commands = loop {
            let Some(line) = self.read_line()? else {
                return Ok(Stage::Done);
            };
            match parse_commands(&line) {
                Ok(commands) => break commands,
                Err(_) => writeln!(self.output, "Please enter valid commands (valid commands are: F L R)")?,
            }
        };

        if let Some(field) = self.field.as_mut() {
            if let Err(e) = field.add_car(&name, pose, commands) {
                writeln!(self.output, "Unable to add {}: {}", name, e)?;
            }
        }
        self.list_cars()?;
        Ok(Stage::Main)
    }

    fn simulation_stage(&mut self) -> io::Result<Stage> {
        self.list_cars()?;
        writeln!(self.output, "\nAfter simulation, the result is:")?;

        let results = match self.field.as_mut() {
            Some(field) => field.simulated_results(),
            None => Ok(Vec::new()),
        };
        match results {
            Ok(lines) => {
                for line in lines {
                    writeln!(self.output, "{}", line)?;
                }
            }
            Err(e) => writeln!(self.output, "Simulation failed: {}", e)?,
        }

        writeln!(
            self.output,
            "\nPlease choose from the following options:\n\
             [1] Start over\n\
             [2] Exit"
        )?;
        match self.read_line()?.as_deref() {
            Some("1") => {
                self.list_cars()?;
                Ok(Stage::Main)
            }
            Some(_) => Ok(Stage::Exit),
            None => Ok(Stage::Done),
        }
    }

    fn exit_stage(&mut self) -> io::Result<Stage> {
        writeln!(self.output, "\nThanks for using Auto Driving Car Simulation!\n\nBye!")?;
        Ok(Stage::Done)
    }

    fn list_cars(&mut self) -> io::Result<()> {
        let details = self.field.as_ref().map(|f| f.car_details()).unwrap_or_default();
        if details.is_empty() {
            return Ok(());
        }

        writeln!(self.output, "\nYour current list of cars are:")?;
        for line in details {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn car_count(&self) -> usize {
        self.field.as_ref().map_or(0, |f| f.cars.len())
    }

    fn is_car_name_used(&self, name: &str) -> bool {
        self.field.as_ref().is_some_and(|f| f.is_car_name_used(name))
    }

    fn is_inside(&self, pose: Pose) -> bool {
        self.field.as_ref().is_some_and(|f| f.size.contains(pose.position))
    }
}
