mod keys;
mod storage;

use num_format::{Locale, ToFormattedString};
use twenty_48::{Direction, GameState, GameStatus, RandomIndex, Rules};
use web_sys::HtmlElement;
use yew::prelude::*;

enum Action {
    Move(Direction),
    NewGame,
    TouchStart(TouchEvent),
    TouchEnd(TouchEvent),
}

impl From<Direction> for Action {
    fn from(d: Direction) -> Self {
        Action::Move(d)
    }
}

struct Model {
    rules: Rules,
    source: RandomIndex,
    gs: GameState,
    container: NodeRef,
    touch_start: Option<(i32, i32)>,
}

impl Model {
    fn play(&mut self, dir: Direction) -> bool {
        if self.gs.status.is_terminal() {
            return false;
        }
        match self.rules.make_move(&self.gs, dir, &mut self.source) {
            Ok(next) => {
                let changed = next != self.gs;
                self.gs = next;
                if changed {
                    storage::save(&self.gs);
                }
                changed
            }
            Err(e) => {
                log::error!("{e}, starting a new game");
                self.restart();
                true
            }
        }
    }

    fn restart(&mut self) {
        self.gs = self.rules.new_game(self.gs.best_score, &mut self.source);
        storage::save(&self.gs);
    }
}

impl Component for Model {
    type Message = Action;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let rules = Rules::default();
        let mut source = RandomIndex::from_os_rng();
        let gs = storage::resume_or(
            storage::load(rules.config()),
            || rules.reset_game(&mut source),
            storage::save,
        );
        Self {
            rules,
            source,
            gs,
            container: NodeRef::default(),
            touch_start: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, action: Self::Message) -> bool {
        match action {
            Action::Move(dir) => self.play(dir),
            Action::NewGame => {
                self.restart();
                true
            }
            Action::TouchStart(ts) => {
                let tl = ts.touches();
                self.touch_start = match (tl.length(), tl.get(0)) {
                    (1, Some(t)) => Some((t.client_x(), t.client_y())),
                    _ => None,
                };
                false
            }
            Action::TouchEnd(te) => {
                let (Some(start), Some(t)) = (self.touch_start.take(), te.changed_touches().get(0))
                else {
                    return false;
                };
                match keys::swipe_direction(start, (t.client_x(), t.client_y())) {
                    Some(dir) => self.play(dir),
                    None => false,
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let rows = self.gs.grid.rows().iter().map(|r| {
            html! {
                <tr>
                    {for r.iter().map(|t| html! {
                        <td>
                            <div class={t.map(|t| format!("value_{}", t.exponent())).unwrap_or("empty".into())}>
                                {if let Some(t) = t { html!{t.as_u64()} } else { "".into() }}
                            </div>
                        </td>
                    })}
                </tr>
            }
        });

        let onkeydown = link.batch_callback(|e: KeyboardEvent| {
            let key = e.key();
            if keys::is_arrow(&key) {
                e.prevent_default();
            }
            keys::direction_for_key(&key).map(Action::from)
        });

        let ontouchstart = link.callback(Action::TouchStart);
        let ontouchend = link.callback(Action::TouchEnd);

        let overlay = match self.gs.status {
            GameStatus::Playing => html! {},
            GameStatus::Won => html! { <div class="overlay win"><p>{ "You Win!" }</p></div> },
            GameStatus::Lost => html! { <div class="overlay lose"><p>{ "Game Over!" }</p></div> },
        };

        html! {
            <div ref={self.container.clone()} class="container" tabindex="0" {onkeydown} {ontouchstart} {ontouchend}>
                <div class="header">
                    <h1>{ "2048" }</h1>
                    <div class="score">
                        <span class="label">{ "Score" }</span>
                        <span>{ self.gs.score.to_formatted_string(&Locale::en) }</span>
                    </div>
                    <div class="score">
                        <span class="label">{ "Best" }</span>
                        <span>{ self.gs.best_score.to_formatted_string(&Locale::en) }</span>
                    </div>
                </div>
                <p class="intro">
                    { "Join the tiles, get to " }
                    <strong>{ self.rules.config().winning_value.to_formatted_string(&Locale::en) }</strong>
                    { "!" }
                </p>
                <button onclick={link.callback(|_| Action::NewGame)}>{ "New Game" }</button>
                <div class="board">
                    <table class="game">
                        { for rows }
                    </table>
                    { overlay }
                </div>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        if let Some(el) = self.container.cast::<HtmlElement>() {
            if let Err(e) = el.focus() {
                log::warn!("could not focus the board: {e:?}");
            }
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<Model>::new().render();
}
