use std::io::{Read, Write};
use std::net::TcpStream;

use anyhow::Context;
use players::player::PlayerApi;
use serde::Deserialize;
use serde_json::de::IoRead;

use crate::json::{JsonFunctionCall, JsonMName, JsonProposedBoard, JsonResult};

/// Runs on the client side of a connection: reads the referee's calls off the wire and dispatches
/// them to a local [`PlayerApi`], writing each result back out.
pub struct RefereeProxy<In: Read, Out: Write> {
    player: Box<dyn PlayerApi>,
    r#in: serde_json::Deserializer<IoRead<In>>,
    out: Out,
}

impl RefereeProxy<TcpStream, TcpStream> {
    pub fn from_tcp(player: Box<dyn PlayerApi>, stream: TcpStream) -> std::io::Result<Self> {
        let r#in = serde_json::Deserializer::from_reader(stream.try_clone()?);
        Ok(Self { player, r#in, out: stream })
    }
}

impl<In: Read, Out: Write> RefereeProxy<In, Out> {
    pub fn new(player: Box<dyn PlayerApi>, r#in: In, out: Out) -> Self {
        Self { player, r#in: serde_json::Deserializer::from_reader(r#in), out }
    }

    /// Processes calls until the referee closes the connection or sends something the protocol
    /// doesn't allow. A single malformed call ends the loop rather than desyncing the stream.
    pub fn listen(mut self) -> anyhow::Result<()> {
        while let Ok(call) = JsonFunctionCall::deserialize(&mut self.r#in) {
            let method = call.0;
            let result = match method {
                JsonMName::Setup => {
                    let (state, goal) = call.into_setup_args().context("parsing setUp arguments")?;
                    self.player.setup(state, goal).context("calling setUp")?;
                    JsonResult::Void
                }
                JsonMName::TakeTurn => {
                    let state = call.into_take_turn_args().context("parsing takeTurn arguments")?;
                    let choice = self.player.take_turn(state).context("calling takeTurn")?;
                    JsonResult::Choice(choice.into())
                }
                JsonMName::Win => {
                    let did_win = call.into_win_args().context("parsing win arguments")?;
                    self.player.won(did_win).context("calling won")?;
                    JsonResult::Void
                }
                JsonMName::ProposeBoard0 => {
                    let (cols, rows) =
                        call.into_propose_board0_args().context("parsing proposeBoard0 arguments")?;
                    let board = self.player.propose_board0(cols, rows).context("calling proposeBoard0")?;
                    JsonResult::Board(JsonProposedBoard::from(&board))
                }
            };
            self.out.write_all(serde_json::to_string(&result)?.as_bytes())?;
            self.out.write_all(b" ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::name::Name;
    use players::player::LocalPlayer;
    use players::strategy::NaiveStrategy;

    #[test]
    fn answers_a_win_call_with_void() {
        let player = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        let call = JsonFunctionCall::win(true);
        let input = format!("{} ", serde_json::to_string(&call).unwrap());
        let mut output = Vec::new();
        let proxy = RefereeProxy::new(Box::new(player), input.as_bytes(), &mut output);
        proxy.listen().unwrap();
        assert_eq!(String::from_utf8(output).unwrap().trim(), "\"void\"");
    }
}
