/*!

This is the long-form manual for `voting_rules` and `timvote`.

## Quick start

The input is a table of valuations: one row per agent (voter), one column per
alternative. The higher the number, the more the agent likes the alternative.
Agents and alternatives are numbered from 1, in row and column order.

```text
3,1,2
1,3,2
2,2,3
```

Running the Borda rule on this table, with ties broken in favour of the
highest-numbered alternative:

```bash
timvote -i valuations.csv --rule borda --tie-break max
```

The same thing from the library:

```
use voting_rules::*;

let matrix = ValuationMatrix::new(vec![
    vec![3.0, 1.0, 2.0],
    vec![1.0, 3.0, 2.0],
    vec![2.0, 2.0, 3.0],
])?;
let profile = PreferenceProfile::from_valuations(&matrix);
assert_eq!(borda(&profile, TieBreak::Max)?, AlternativeId(3));
assert_eq!(plurality(&profile, "min".parse()?)?, AlternativeId(1));

# Ok::<(), VotingErrors>(())
```

## From valuations to preferences

Every agent ranks the alternatives by decreasing valuation. When an agent
gives exactly the same valuation to several alternatives, the one with the
highest number is ranked first. In the example above, agent 3 values
alternatives 1 and 2 equally and its ranking is `3, 2, 1`.

## Rules

* `dictatorship` the top choice of a designated agent (`--agent`).
* `plurality` the alternative ranked first most often.
* `veto` every agent gives one point to all the alternatives except its last one.
* `borda` the alternative ranked at position `j` (starting at 0) receives `m - 1 - j` points.
* `harmonic` the alternative ranked at position `j` receives `1 / (j + 1)` points.
* `scoring` a positional rule with an arbitrary score vector (`--score-vector 3,2,1`).
  The scores are sorted in decreasing order before use: `1,2,3` is the same as `3,2,1`.
  The vector must have exactly one score per alternative.
* `stv` single transferable vote. At each round, all the alternatives with
  the fewest first places are eliminated together, and every agent that ranked
  one of them gives one more point to its new first choice. The count stops
  when all the remaining alternatives have the same number of points.
* `range` the sum of the raw valuations, without ranking.

## Tie-breaks

When several alternatives share the best score, the tie-break decides:

* `min` the lowest-numbered alternative,
* `max` the highest-numbered alternative,
* an agent number: the alternative that this agent ranks the highest.

For `stv`, the agent's complete ranking is used, as computed from the
valuations before any elimination.

## Input formats

### `csv`

Comma Separated Values, one agent per line. Lines before `firstValueRowIndex`
and columns before `firstValueColumnIndex` are skipped (both start at 1), which
allows a header row and an id column:

```text
agent,pizza,sushi,tacos
alice,3,1,2
bob,1,3,2
```

### `xlsx`

Excel spreadsheet, read with the same offsets. Empty cells count as 0.
If the workbook has more than one worksheet, `excelWorksheetName` must be set.

## Configuration

`timvote` accepts a configuration file in JSON:

```text
{
  "outputSettings": { "contestName": "Lunch", "outputDirectory": "out" },
  "valuationSources": [
    { "provider": "csv", "filePath": "lunch.csv",
      "firstValueRowIndex": 2, "firstValueColumnIndex": "B" }
  ],
  "rules": { "rule": "stv", "tieBreak": 1 }
}
```

* `valuationSources` (array): the files to read. The paths are relative to the
  configuration file. The agents of all the files are concatenated in order.
* `firstValueColumnIndex` (number or Excel column letter, optional): the first
  column with valuations.
* `rules.tieBreak` (`"min"`, `"max"` or an agent number).
* `rules.dictator` (number): the agent for the `dictatorship` rule.
* `rules.scoreVector` (array of numbers): the scores for the `scoring` rule.

Options passed on the command line take precedence over the file.

 */
