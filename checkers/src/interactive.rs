use checkers_agents::AiPlayer;
use checkers_core::{
    ContinuationStatus, Difficulty, Move, Player, Rank, Session, SessionState, Square,
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};

pub struct InteractiveGame {
    session: Session,
    ai: Option<AiPlayer>,
    seed: Option<u64>,
    cursor_pos: (u8, u8), // (row, col) in 0-7 range
    selected_square: Option<Square>,
    targets: Vec<Move>,
    message: String,
}

impl InteractiveGame {
    pub fn new(difficulty: Difficulty, ai_player: Option<Player>, seed: Option<u64>) -> Self {
        let session = Session::new(difficulty, ai_player);
        Self {
            ai: AiPlayer::for_session(&session, seed),
            session,
            seed,
            cursor_pos: (5, 0),
            selected_square: None,
            targets: Vec::new(),
            message: String::from("Use hjkl to move, Enter to select/move, q to quit"),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        // Cleanup
        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            if self.session.is_ai_turn() && !self.session.is_game_over() {
                self.ai_move()?;
            }

            if let SessionState::Terminal(winner) = self.session.state() {
                self.message = format!("{winner} wins! n = new game, any other key quits");
                self.draw_board()?;
                if self.wait_key()? == KeyCode::Char('n') {
                    self.new_game();
                    continue;
                }
                break;
            }

            self.draw_board()?;

            match self.wait_key()? {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => self.handle_selection(),
                KeyCode::Char('n') => self.new_game(),
                _ => {}
            }
        }

        Ok(())
    }

    fn wait_key(&self) -> io::Result<KeyCode> {
        loop {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Press {
                    return Ok(code);
                }
            }
        }
    }

    fn move_cursor(&mut self, d_row: i8, d_col: i8) {
        let row = self.cursor_pos.0 as i8 + d_row;
        let col = self.cursor_pos.1 as i8 + d_col;

        if (0..8).contains(&row) && (0..8).contains(&col) {
            self.cursor_pos = (row as u8, col as u8);
        }
    }

    fn handle_selection(&mut self) {
        let (row, col) = self.cursor_pos;
        let Some(cursor_square) = Square::new(row, col) else {
            return;
        };

        if let Some(selected) = self.selected_square {
            if self.targets.iter().any(|m| m.to == cursor_square) {
                self.commit(selected, cursor_square);
                return;
            }
        }

        if self.session.is_selectable(i32::from(row), i32::from(col)) {
            self.selected_square = Some(cursor_square);
            self.targets = self.session.legal_moves_from(cursor_square);
            self.message = format!("Selected {cursor_square}");
            return;
        }

        self.clear_selection();
        let piece = self.session.piece_at(i32::from(row), i32::from(col));
        self.message = match (self.session.must_continue(), piece) {
            (Some(origin), _) => format!("Keep jumping with the piece on {origin}"),
            (None, Some(piece)) if piece.owner == self.session.current_player() => {
                if self.session.has_mandatory_captures() {
                    String::from("A capture is available and must be taken")
                } else {
                    String::from("That piece cannot move")
                }
            }
            _ => format!("Select one of {}'s pieces", self.session.current_player()),
        };
    }

    fn commit(&mut self, from: Square, to: Square) {
        match self.session.commit_squares(from, to) {
            Ok(ContinuationStatus::MustContinue(square)) => {
                self.selected_square = Some(square);
                self.targets = self.session.legal_moves_from(square);
                self.cursor_pos = (square.row(), square.col());
                self.message = format!("Moved {from} to {to}, keep jumping");
            }
            Ok(ContinuationStatus::TurnPassed) => {
                self.clear_selection();
                self.message = format!("Moved {from} to {to}");
            }
            Err(reason) => {
                self.clear_selection();
                self.message = reason.to_string();
            }
        }
    }

    fn ai_move(&mut self) -> io::Result<()> {
        let Some(name) = self.ai.as_ref().map(|ai| ai.name().to_string()) else {
            return Ok(());
        };
        self.message = format!("{name} thinking...");
        self.draw_board()?;

        let Some(ai) = self.ai.as_mut() else {
            return Ok(());
        };
        let played = ai.take_turn(&mut self.session);
        let listed: Vec<String> = played.iter().map(|p| p.mv.to_string()).collect();
        self.message = if listed.is_empty() {
            String::from("Computer has no move")
        } else {
            format!("Computer played {}", listed.join(", "))
        };
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.targets.clear();
    }

    fn new_game(&mut self) {
        self.session = Session::with_config(self.session.config());
        self.ai = AiPlayer::for_session(&self.session, self.seed);
        self.clear_selection();
        self.cursor_pos = (5, 0);
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;
        stdout.execute(Clear(ClearType::FromCursorDown))?;

        // Title
        println!("Checkers - Interactive Mode (vim keys: hjkl)\r");
        println!("Commands: Enter=select/move, n=new, q=quit\r");
        println!("\r");

        // Board with coordinates
        println!("   0 1 2 3 4 5 6 7  \r");
        println!("  ┌─────────────────┐\r");

        for row in 0..8u8 {
            print!("{row} │ ");

            for col in 0..8u8 {
                let Some(square) = Square::new(row, col) else {
                    continue;
                };

                let is_cursor = self.cursor_pos == (row, col);
                let is_selected = self.selected_square == Some(square);
                let is_target = self.targets.iter().any(|m| m.to == square);

                // Set background color
                if is_cursor {
                    stdout.execute(SetBackgroundColor(TermColor::Yellow))?;
                } else if is_selected {
                    stdout.execute(SetBackgroundColor(TermColor::Green))?;
                } else if is_target {
                    stdout.execute(SetBackgroundColor(TermColor::Blue))?;
                } else if square.is_dark() {
                    stdout.execute(SetBackgroundColor(TermColor::DarkGrey))?;
                } else {
                    stdout.execute(SetBackgroundColor(TermColor::Black))?;
                }

                // Draw piece or empty square
                if let Some(piece) = self.session.board().piece_at(square) {
                    let symbol = match piece.rank {
                        Rank::Man => '●',
                        Rank::King => '♛',
                    };

                    if piece.owner == Player::White {
                        stdout.execute(SetForegroundColor(TermColor::White))?;
                    } else {
                        stdout.execute(SetForegroundColor(TermColor::Magenta))?;
                    }

                    print!("{} ", symbol);
                } else {
                    print!("  ");
                }

                stdout.execute(ResetColor)?;
            }

            println!("│ {row}\r");
        }

        println!("  └─────────────────┘\r");
        println!("   0 1 2 3 4 5 6 7  \r");
        println!("\r");

        // Game info
        println!(
            "{} to move | Move {} | {}\r",
            self.session.current_player(),
            self.session.move_count() + 1,
            self.session.difficulty()
        );
        if let Some(origin) = self.session.must_continue() {
            println!("Capture chain: continue from {origin}\r");
        } else if self.session.has_mandatory_captures() {
            println!("Capture is mandatory\r");
        } else {
            println!("\r");
        }

        // Status message
        println!("\r");
        println!("{}\r", self.message);

        stdout.flush()?;
        Ok(())
    }
}
