/*!
# Commands

## `REM <anything>`
Ignores the rest of the source line, colons included.

## `LET <cell>=<expression>`
Evaluates the right side and stores its value into the cell. The left
side is a bare number, or any expression whose integer value names the
cell.

## `PRINT <expression>[;]`
Writes the value and a newline. A trailing `;` leaves out the newline.

## `INPUT <cell>`
Reads a line and stores its leading integer. Anything else reads as 0.

## `GET <cell>`
Reads one byte and stores its code. At end of input it stores 256.

## `PUT <expression>`
Writes one byte: the low byte of an integer, or the first byte of a string.

## `END`
Stops the program.

## Example
```text
10 PRINT "Type a letter";
20 GET 100
30 PUT 100:PUT 10
40 END
```

*/
