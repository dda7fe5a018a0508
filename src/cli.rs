//! Menu de texto para usar la cafetera desde la terminal
use std::io::{BufRead, Write};

use crate::{coffee_maker::CoffeeMaker, errors::MachineError};

const SEPARATOR: &str = "-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-";

const OPTIONS: [&str; 9] = [
    "1. List beverages",
    "2. List ingredients",
    "3. Pour a beverage",
    "4. Add an ingredient",
    "5. Remove an ingredient",
    "6. Refill an ingredient",
    "7. Refill all ingredients",
    "8. Show statistics",
    "9. Stop coffee machine",
];

const STOP_OPTION: usize = 9;

pub struct Cli<'a, R, W> {
    machine: &'a CoffeeMaker,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Cli<'a, R, W> {
    pub fn new(machine: &'a CoffeeMaker, input: R, output: W) -> Cli<'a, R, W> {
        Cli {
            machine,
            input,
            output,
        }
    }

    /// Atiende al usuario hasta que elige apagar la cafetera o se cierra la entrada
    pub fn run(&mut self) -> Result<(), MachineError> {
        loop {
            self.print_options()?;
            self.print_notifications()?;
            self.print_low_stock()?;

            let option = match self.select_option()? {
                Some(option) => option,
                None => return Ok(()),
            };
            if option == STOP_OPTION {
                return Ok(());
            }
            match self.service_option(option) {
                Ok(()) => {}
                Err(MachineError::LockError) => return Err(MachineError::LockError),
                Err(e) => self.println(&format!("{}\n", e))?,
            }
        }
    }

    fn service_option(&mut self, option: usize) -> Result<(), MachineError> {
        match option {
            1 => self.list_beverages(),
            2 => self.list_ingredients(),
            3 => {
                self.list_beverages()?;
                let beverage = self.ask("Select a beverage : ")?;
                self.machine.serve(&beverage)
            }
            4 => {
                let name = self.ask("Enter ingredient name : ")?;
                self.machine.add_ingredient(&name)
            }
            5 => {
                let name = self.ask("Enter ingredient name : ")?;
                self.machine.remove_ingredient(&name)
            }
            6 => {
                let name = self.ask("Enter ingredient name : ")?;
                self.machine.refill_ingredient(&name)
            }
            7 => self.machine.refill_all(),
            8 => {
                let report = self.machine.statistics_report()?;
                self.println(&report)?;
                let free = self.machine.free_outlets()?;
                self.println(&format!("Free outlets: {}\n", free))
            }
            _ => Ok(()),
        }
    }

    fn print_options(&mut self) -> Result<(), MachineError> {
        for option in OPTIONS {
            self.println(option)?;
        }
        Ok(())
    }

    fn print_notifications(&mut self) -> Result<(), MachineError> {
        self.println("\nNotifications : ")?;
        let notifications = self.machine.drain_notifications();
        if notifications.is_empty() {
            return self.println("No new notifications");
        }
        for notification in notifications {
            self.println(&notification)?;
        }
        Ok(())
    }

    fn print_low_stock(&mut self) -> Result<(), MachineError> {
        let low = self.machine.low_stock_ingredients()?;
        if low.is_empty() {
            return Ok(());
        }
        let names: Vec<String> = low.iter().map(|i| i.name().to_uppercase()).collect();
        self.println(&format!("Ingredients running low: {}", names.join("\t")))
    }

    fn list_beverages(&mut self) -> Result<(), MachineError> {
        let mut names: Vec<String> = self
            .machine
            .list_beverages()
            .iter()
            .map(|beverage| beverage.name().to_uppercase())
            .collect();
        names.sort();
        self.println(SEPARATOR)?;
        for name in names {
            self.println(&name)?;
        }
        self.println(&format!("{}\n", SEPARATOR))
    }

    fn list_ingredients(&mut self) -> Result<(), MachineError> {
        let mut ingredients: Vec<_> = self.machine.list_ingredients()?.into_iter().collect();
        ingredients.sort();
        self.println(SEPARATOR)?;
        for (ingredient, quantity) in ingredients {
            self.println(&format!(
                "Name: {}\tQuantity: {}",
                ingredient.name().to_uppercase(),
                quantity
            ))?;
        }
        self.println(&format!("{}\n", SEPARATOR))
    }

    /// Pide una opcion hasta que sea valida. `None` si se termino la entrada.
    fn select_option(&mut self) -> Result<Option<usize>, MachineError> {
        let mut prompt = "\nSelect an action : ".to_string();
        loop {
            let line = match self.read_line(&prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };
            match line.parse::<usize>() {
                Ok(option) if (1..=OPTIONS.len()).contains(&option) => return Ok(Some(option)),
                _ => prompt = format!("Please select a valid option (1 - {}): ", OPTIONS.len()),
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, MachineError> {
        Ok(self.read_line(prompt)?.unwrap_or_default())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, MachineError> {
        write!(self.output, "{}", prompt).map_err(io_error)?;
        self.output.flush().map_err(io_error)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    fn println(&mut self, line: &str) -> Result<(), MachineError> {
        writeln!(self.output, "{}", line).map_err(io_error)
    }
}

fn io_error(e: std::io::Error) -> MachineError {
    MachineError::Io(e.to_string())
}
